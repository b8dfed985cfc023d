/// Forwarding handler - fetch, rewrite, send and delete each SES record
use sesforward_core::email::rewrite_mail;
use sesforward_core::error::ForwardError;
use sesforward_core::models::{MailConfig, SesEvent, SesEventRecord};
use sesforward_core::services::{
    EmailSender, EnvConfigProvider, S3StorageService, SesEmailSender, StorageService,
};
use sesforward_core::utils::logging::{redact_email, sanitize_s3_key_for_log};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// Forwarding handler context, built once per invocation
pub struct ForwardContext {
    pub storage: Arc<dyn StorageService>,
    pub sender: Arc<dyn EmailSender>,
    pub config: MailConfig,
}

impl ForwardContext {
    pub fn new(
        storage: Arc<dyn StorageService>,
        sender: Arc<dyn EmailSender>,
        config: MailConfig,
    ) -> Self {
        Self {
            storage,
            sender,
            config,
        }
    }

    /// Reads configuration from the environment and creates the AWS clients
    pub async fn from_env() -> Result<Self, ForwardError> {
        let config = EnvConfigProvider::new()?.into_config();

        let aws_config = aws_config::load_from_env().await;
        if aws_config.region().is_none() {
            return Err(ForwardError::SessionInit(
                "could not create session: no AWS region configured".to_string(),
            ));
        }

        let s3_client = aws_sdk_s3::Client::new(&aws_config);
        let ses_client = aws_sdk_ses::Client::new(&aws_config);

        Ok(Self::new(
            Arc::new(S3StorageService::new(s3_client)),
            Arc::new(SesEmailSender::new(ses_client)),
            config,
        ))
    }
}

/// Processes records strictly in order; the first failure aborts the batch
///
/// Records after the failing one are left untouched, so their raw messages
/// stay in the bucket.
pub async fn handle(ctx: &ForwardContext, event: &SesEvent) -> Result<(), ForwardError> {
    let total = event.records.len();
    info!("Processing {} SES record(s)", total);

    for (index, record) in event.records.iter().enumerate() {
        if let Err(e) = process_record(ctx, record).await {
            error!(
                target: "error_handling",
                record = index,
                unprocessed = total - index - 1,
                step = e.step(),
                retriable = e.is_retriable(),
                error = %redact_email(&e.to_string()),
                "Forwarding failed, aborting batch"
            );
            return Err(e);
        }
    }

    info!("Forwarded {} message(s)", total);
    Ok(())
}

#[tracing::instrument(
    name = "forward.process_record",
    skip(ctx, record),
    fields(ses_message_id = %record.ses.mail.message_id)
)]
async fn process_record(ctx: &ForwardContext, record: &SesEventRecord) -> Result<(), ForwardError> {
    let start = Instant::now();
    let bucket = &ctx.config.mail_bucket;

    // 1. Derive storage key from the Message-ID header
    let key = record.object_key()?;
    info!(
        "Fetching raw message s3://{}/{}",
        bucket,
        sanitize_s3_key_for_log(&key)
    );

    // 2. Fetch raw message
    let raw_email = ctx.storage.download(bucket, &key).await?;

    // 3. Rewrite headers
    let rewritten = rewrite_mail(&raw_email, &ctx.config)?;

    // 4. Send under the configured set
    let ses_id = ctx
        .sender
        .send_raw_email(&rewritten, &ctx.config.configuration_set)
        .await?;

    // 5. Delete only after a successful send
    ctx.storage.delete(bucket, &key).await?;

    info!(
        ses_id = %ses_id,
        original_bytes = raw_email.len(),
        forwarded_bytes = rewritten.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Forwarded message"
    );

    Ok(())
}
