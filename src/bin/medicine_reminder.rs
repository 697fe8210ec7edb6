use anyhow::Context;
use clap::Parser;
use daily_notifier::core::reminder::send_reminder;
use daily_notifier::utils::{logger, validation::Validate};
use daily_notifier::{NotifierConfig, NotifierError, ReminderArgs, SystemClock, WeComNotifier};

async fn run(args: &ReminderArgs) -> anyhow::Result<bool> {
    let mut config = NotifierConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let notifier = WeComNotifier::new(
        vec![config.webhook.reminder_target()?],
        config.webhook.timeout(),
        config.webhook.pause(),
    )
    .context("failed to build webhook client")?;

    Ok(send_reminder(args.kind.as_deref(), &SystemClock, &notifier).await)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = ReminderArgs::parse();
    logger::init(args.verbose, args.json_logs);

    match run(&args).await {
        Ok(true) => println!("✅ 喝药提醒发送成功"),
        Ok(false) => println!("❌ 喝药提醒发送失败"),
        Err(e) => {
            tracing::error!("❌ 发送提醒时出现错误: {:#}", e);
            if let Some(inner) = e.downcast_ref::<NotifierError>() {
                tracing::error!("💡 Suggestion: {}", inner.recovery_suggestion());
            }
            eprintln!("❌ {:#}", e);
        }
    }
}
