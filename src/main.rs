use anyhow::Context;
use clap::Parser;
use daily_notifier::domain::ports::Notifier;
use daily_notifier::utils::{logger, validation::Validate};
use daily_notifier::{
    DailyApiClient, DigestArgs, DigestEngine, HolidayApiClient, NotifierConfig, NotifierError,
    SystemClock, WeComNotifier,
};

async fn run(args: &DigestArgs) -> anyhow::Result<bool> {
    let mut config = NotifierConfig::load(args.config.as_deref())?;
    args.apply_overrides(&mut config);
    config.validate()?;

    let daily = DailyApiClient::from_config(&config).context("failed to build news client")?;
    let holidays =
        HolidayApiClient::from_config(&config).context("failed to build holiday client")?;
    let clock = SystemClock;
    let engine = DigestEngine::new(
        &daily,
        &daily,
        &holidays,
        &clock,
        config.countdown.horizon_days,
    );

    if args.dry_run {
        let outcome = engine.run(None).await;
        println!("{}", outcome.message);
        return Ok(true);
    }

    let notifier = WeComNotifier::new(
        config.webhook.digest_targets()?,
        config.webhook.timeout(),
        config.webhook.pause(),
    )
    .context("failed to build webhook client")?;

    let outcome = engine.run(Some(&notifier as &dyn Notifier)).await;
    let report = outcome.report.unwrap_or_default();
    if report.all_delivered() {
        println!("✅ 所有企业微信推送完成 ({} targets)", report.success);
    } else {
        println!(
            "❌ 消息推送失败: 成功 {}, 失败 {}",
            report.success, report.failed
        );
        for error in &report.errors {
            println!(" - {}", error);
        }
    }
    Ok(report.all_delivered())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = DigestArgs::parse();
    logger::init(args.verbose, args.json_logs);

    tracing::info!("🚀 Starting daily-brief");

    // 所有錯誤在這裡收斂，程式一律正常結束
    match run(&args).await {
        Ok(true) => tracing::info!("✅ Daily digest finished"),
        Ok(false) => tracing::warn!("⚠️ Daily digest finished with delivery failures"),
        Err(e) => {
            tracing::error!("❌ Daily digest aborted: {:#}", e);
            if let Some(inner) = e.downcast_ref::<NotifierError>() {
                tracing::error!("💡 Suggestion: {}", inner.recovery_suggestion());
            }
            eprintln!("❌ {:#}", e);
        }
    }
}
