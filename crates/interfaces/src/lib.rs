pub mod terminal;
pub mod traits;

pub use terminal::{parse_input_line, render_history, wifi_notice, TerminalInterface};
pub use traits::{Presenter, Scanner, ScannerEvent};
