//! Thin wrappers over the AWS service clients.
//!
//! Each service issues one describe call per query (responses are assumed to
//! fit a single page) and converts the typed SDK output into raw JSON
//! records carrying the provider's wire field names. Normalization happens
//! elsewhere; these converters only reshape SDK structs into the JSON the
//! rest of the pipeline consumes.

use aws_sdk_ec2::error::ProvideErrorMetadata;
use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
use aws_smithy_runtime_api::client::result::SdkError;
use tracing::warn;

use super::fault::ProviderFault;

pub mod ec2;
pub mod elbv2;
pub mod rds;
pub mod sts;

pub use ec2::Ec2Service;
pub use elbv2::ElbService;
pub use rds::RdsService;
pub use sts::StsService;

/// Capture a failed SDK call as a [`ProviderFault`], logging the operation
/// that failed.
pub(crate) fn query_fault<E>(
    operation: &'static str,
    err: SdkError<E, HttpResponse>,
) -> ProviderFault
where
    E: ProvideErrorMetadata,
{
    let fault = ProviderFault::from_sdk(err);
    warn!(
        operation,
        code = fault.code.as_deref().unwrap_or("-"),
        status = fault.status_code,
        "provider query failed"
    );
    fault
}
