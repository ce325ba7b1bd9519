//! A flow that accepts every lifecycle call and does nothing.
//!
//! Stands in for intent flows when only their registration and
//! installation matter.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::FlowResult;
use crate::ports::{CallSession, Dialog, DialogError};

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDialog;

#[async_trait]
impl Dialog for NoopDialog {
    async fn begin(&self, _session: &dyn CallSession, _args: Value) -> Result<(), DialogError> {
        Ok(())
    }

    async fn reply_received(&self, _session: &dyn CallSession) -> Result<(), DialogError> {
        Ok(())
    }

    async fn resumed(
        &self,
        _session: &dyn CallSession,
        _result: FlowResult,
    ) -> Result<(), DialogError> {
        Ok(())
    }
}
