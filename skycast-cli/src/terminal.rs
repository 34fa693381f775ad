use skycast_core::{DetailLine, DisplaySurface, IconImage};

/// Prints report slots to stdout; errors and the loading indicator go to stderr.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    quiet: bool,
}

impl TerminalSurface {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl DisplaySurface for TerminalSurface {
    fn set_city(&self, text: &str) {
        println!("{text}");
    }

    fn set_temperature(&self, text: &str) {
        println!("  {text}");
    }

    fn set_description(&self, text: &str) {
        if !text.is_empty() {
            println!("  {text}");
        }
    }

    fn set_icon(&self, icon: Option<&IconImage>) {
        if let Some(icon) = icon {
            println!("  Icon: {}", icon.url);
        }
    }

    fn set_details(&self, lines: &[DetailLine]) {
        for line in lines {
            println!("  {line}");
        }
    }

    fn show_error(&self, message: &str) -> bool {
        eprintln!("error: {message}");
        true
    }

    fn set_loading(&self, visible: bool) {
        if visible && !self.quiet {
            eprintln!("Fetching weather...");
        }
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}
