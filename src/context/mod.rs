pub mod formatter;

pub use formatter::ContextFormatter;
