pub trait MessageFormatter {
    fn format(&self, message: &str) -> String;
}
