use crate::config::NotifierConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "daily-brief")]
#[command(about = "Push the daily news, history and rest-day countdown to WeCom bots")]
pub struct DigestArgs {
    /// Path to TOML configuration file (defaults to ./notifier.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Webhook URL; repeat to deliver to several bots. Overrides webhook.digest_urls
    #[arg(long = "webhook")]
    pub webhooks: Vec<String>,

    /// Print the message instead of sending it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "medicine-reminder")]
#[command(about = "Send a medication reminder to a WeCom bot")]
pub struct ReminderArgs {
    /// morning, afternoon, evening, general or auto (default: pick by current hour)
    pub kind: Option<String>,

    /// Path to TOML configuration file (defaults to ./notifier.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Webhook URL. Overrides webhook.reminder_url
    #[arg(long)]
    pub webhook: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

impl DigestArgs {
    /// 命令列的 webhook 優先於設定檔
    pub fn apply_overrides(&self, config: &mut NotifierConfig) {
        if !self.webhooks.is_empty() {
            config.webhook.digest_urls = self.webhooks.clone();
            tracing::info!("🔧 Digest webhooks overridden ({} targets)", self.webhooks.len());
        }
    }
}

impl ReminderArgs {
    pub fn apply_overrides(&self, config: &mut NotifierConfig) {
        if let Some(webhook) = &self.webhook {
            config.webhook.reminder_url = Some(webhook.clone());
            tracing::info!("🔧 Reminder webhook overridden");
        }
    }
}
