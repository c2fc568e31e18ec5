use dotenv::dotenv;
use fang::Queue;
use fang::Queueable;
use fang::RetentionMode;
use fang::WorkerPool;
use newsletter_ingest::db;
use newsletter_ingest::sync::{IngestJob, JOB_TYPE};
use std::process;

fn main() {
    dotenv().ok();
    env_logger::init();

    let pool = match db::pool() {
        Ok(pool) => pool.clone(),
        Err(error) => {
            log::error!("Failed to create connection pool: {}", error);
            process::exit(1);
        }
    };

    let queue = Queue::builder().connection_pool(pool).build();

    if let Err(error) = queue.schedule_task(&IngestJob::new()) {
        log::error!("Failed to schedule ingestion: {:?}", error);
        process::exit(1);
    }

    let mut worker_pool = WorkerPool::<Queue>::builder()
        .queue(queue)
        .retention_mode(RetentionMode::RemoveFinished)
        .number_of_workers(1_u32)
        .task_type(JOB_TYPE.to_string())
        .build();

    if let Err(error) = worker_pool.start() {
        log::error!("Failed to start workers: {:?}", error);
        process::exit(1);
    }

    log::info!("Started ingestion worker");

    std::thread::park();
}
