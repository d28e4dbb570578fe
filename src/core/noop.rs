//! Logger that discards everything

use super::fields::{Fields, Value};
use super::logger::Logger;

/// Every method is an empty body: no formatting, no allocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    #[inline]
    fn debug(&self, _args: &[Value<'_>]) {}
    #[inline]
    fn info(&self, _args: &[Value<'_>]) {}
    #[inline]
    fn warn(&self, _args: &[Value<'_>]) {}
    #[inline]
    fn error(&self, _args: &[Value<'_>]) {}

    #[inline]
    fn debugf(&self, _format: &str, _args: &[Value<'_>]) {}
    #[inline]
    fn infof(&self, _format: &str, _args: &[Value<'_>]) {}
    #[inline]
    fn warnf(&self, _format: &str, _args: &[Value<'_>]) {}
    #[inline]
    fn errorf(&self, _format: &str, _args: &[Value<'_>]) {}

    #[inline]
    fn debugt(&self, _msg: &str, _fields: Option<&Fields>) {}
    #[inline]
    fn infot(&self, _msg: &str, _fields: Option<&Fields>) {}
    #[inline]
    fn warnt(&self, _msg: &str, _fields: Option<&Fields>) {}
    #[inline]
    fn errort(&self, _msg: &str, _fields: Option<&Fields>) {}
}
