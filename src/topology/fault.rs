//! Fault shapes for failed provider queries.
//!
//! A failed sub-query never propagates as a transport error. The raw SDK
//! failure is captured as a [`ProviderFault`] at the client boundary and
//! downgraded to a [`FaultEnvelope`] wherever a resource's records would
//! otherwise appear, so callers inspect each slot to learn what failed.

use aws_sdk_ec2::error::ProvideErrorMetadata;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_types::request_id::RequestId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything we keep from a failed SDK call.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderFault {
    pub request_id: Option<String>,
    pub status_code: Option<u16>,
    pub code: Option<String>,
    pub message: Option<String>,
    pub time: DateTime<Utc>,
}

impl ProviderFault {
    /// Capture an `SdkError` from any service client.
    ///
    /// Service errors carry an error code, message and request id in their
    /// metadata; transport-level failures (dispatch, timeout, construction)
    /// have none, so the variant name stands in as the code.
    pub fn from_sdk<E>(err: SdkError<E, HttpResponse>) -> Self
    where
        E: ProvideErrorMetadata,
    {
        let status_code = match &err {
            SdkError::ServiceError(context) => Some(context.raw().status().as_u16()),
            SdkError::ResponseError(context) => Some(context.raw().status().as_u16()),
            _ => None,
        };

        let meta = err.meta();
        let request_id = meta.request_id().map(str::to_string);
        let code = meta
            .code()
            .map(str::to_string)
            .unwrap_or_else(|| transport_label(&err).to_string());
        let message = meta
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| err.to_string());

        Self {
            request_id,
            status_code,
            code: Some(code),
            message: Some(message),
            time: Utc::now(),
        }
    }
}

fn transport_label<E>(err: &SdkError<E, HttpResponse>) -> &'static str {
    match err {
        SdkError::ConstructionFailure(_) => "ConstructionFailure",
        SdkError::TimeoutError(_) => "TimeoutError",
        SdkError::DispatchFailure(_) => "DispatchFailure",
        SdkError::ResponseError(_) => "ResponseError",
        _ => "ServiceError",
    }
}

/// Wire shape substituted for a failed query's records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FaultEnvelope {
    #[serde(rename = "requestId")]
    pub request_id: Option<String>,
    #[serde(rename = "statusCode")]
    pub status_code: Option<u16>,
    #[serde(rename = "errorCode")]
    pub error_code: Option<String>,
    pub time: DateTime<Utc>,
}

impl From<ProviderFault> for FaultEnvelope {
    fn from(fault: ProviderFault) -> Self {
        Self {
            request_id: fault.request_id,
            status_code: fault.status_code,
            error_code: fault.code,
            time: fault.time,
        }
    }
}
