/// Logging port used by every storefront use case.
///
/// Infrastructure provides the concrete sink (see the `logger` crate).
pub trait Logger: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
    fn debug(&self, message: &str);
}
