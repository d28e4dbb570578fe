//! The logging facade

use super::error::Result;
use super::fields::{Fields, Value};

/// Leveled logging in three styles: print, printf and structured.
///
/// Every method is `#[track_caller]`, so implementations that record the
/// caller see the application call site rather than the facade.
///
/// # Example
///
/// ```
/// use tslog::prelude::*;
/// use tslog::{fields, values};
///
/// fn serve(logger: &dyn Logger) {
///     logger.info(&values!["listening on ", 8080]);
///     logger.warnf("slow request: %dms", &values![1250]);
///     logger.errort("request failed", Some(&fields! { "status" => 503 }));
/// }
///
/// serve(&NoopLogger);
/// ```
pub trait Logger: Send + Sync {
    /// Operands are concatenated; a space separates two adjacent operands
    /// when neither is a string.
    #[track_caller]
    fn debug(&self, args: &[Value<'_>]);
    #[track_caller]
    fn info(&self, args: &[Value<'_>]);
    #[track_caller]
    fn warn(&self, args: &[Value<'_>]);
    #[track_caller]
    fn error(&self, args: &[Value<'_>]);

    /// printf-style message. Operand mismatches render as inline markers and
    /// never panic.
    #[track_caller]
    fn debugf(&self, format: &str, args: &[Value<'_>]);
    #[track_caller]
    fn infof(&self, format: &str, args: &[Value<'_>]);
    #[track_caller]
    fn warnf(&self, format: &str, args: &[Value<'_>]);
    #[track_caller]
    fn errorf(&self, format: &str, args: &[Value<'_>]);

    /// Message plus structured fields. `None` or empty fields log the
    /// message alone.
    #[track_caller]
    fn debugt(&self, msg: &str, fields: Option<&Fields>);
    #[track_caller]
    fn infot(&self, msg: &str, fields: Option<&Fields>);
    #[track_caller]
    fn warnt(&self, msg: &str, fields: Option<&Fields>);
    #[track_caller]
    fn errort(&self, msg: &str, fields: Option<&Fields>);

    /// Flush and release resources. Idempotent.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}
