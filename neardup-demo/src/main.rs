use log::{error, info};
use neardup::minhash::{MinHashEstimator, MinHashParams};


fn run(docs: &[&str]) -> neardup::Result<()> {
    let estimator = MinHashEstimator::new(docs.iter().copied(), MinHashParams::default())?;
    let matrix = estimator.estimate()?;
    let report = estimator.report(&matrix)?;
    print!("{}", report);

    let near_duplicates = estimator.threshold_report(&matrix)?;
    info!("{} of {} pairs at or above threshold {}",
          near_duplicates.len(), report.len(), estimator.params().threshold);
    Ok(())
}

fn main() {
    env_logger::init();
    let docs = [
        "我们在这类非常开心",
        "我们在这里非常开心",
        "如果记忆能被定格，你的高中会是怎样的一幅画？高考开始，愿你全力以赴大胜归来！",
        "如果记忆能被定格，你的高中会是怎样的？高考开始，全力以赴大胜归来！",
    ];
    if let Err(e) = run(&docs) {
        error!("{}", e);
        std::process::exit(1);
    }
}
