//! End-to-end worker scenarios against a mock skadi server

use serde_json::json;
use skadi_worker::{
    CancellationToken, ExecutionOutcome, HandlerError, TickOutcome, Worker, WorkerConfig,
    WorkerError, handler_fn,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "agent-token";

fn fast_config() -> WorkerConfig {
    WorkerConfig::new(Duration::from_millis(20), Duration::from_millis(200))
}

fn connect(server: &MockServer) -> Worker<skadi_client::AgentClient> {
    Worker::connect(&server.uri(), TOKEN, fast_config()).unwrap()
}

async fn mount_no_job(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/agent/job"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

#[tokio::test]
async fn ping_job_is_reported_as_succeeded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent/job"))
        .and(header("authorization", "Bearer agent-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "j1", "message": "ping"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_no_job(&server).await;
    Mock::given(method("PUT"))
        .and(path("/agent/jobs/j1/succeed"))
        .and(header("authorization", "Bearer agent-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"result": "pong"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/agent/jobs/j1/fail"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let calls = AtomicUsize::new(0);
    let handler = handler_fn(|id: &str, message: &str| -> Result<String, HandlerError> {
        calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!((id, message), ("j1", "ping"));
        Ok("pong".to_string())
    });

    let mut worker = connect(&server);
    let shutdown = CancellationToken::new();
    let stopper = {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            shutdown.cancel();
        })
    };

    worker.run(&handler, shutdown).await.unwrap();
    stopper.await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    server.verify().await;
}

#[tokio::test]
async fn empty_queue_runs_nothing_and_reports_nothing() {
    let server = MockServer::start().await;
    mount_no_job(&server).await;

    let calls = AtomicUsize::new(0);
    let handler = handler_fn(|_: &str, _: &str| -> Result<String, HandlerError> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(String::new())
    });

    let mut worker = connect(&server);
    assert_eq!(worker.run_once(&handler).await.unwrap(), TickOutcome::NoJob);
    assert_eq!(worker.run_once(&handler).await.unwrap(), TickOutcome::NoJob);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests.iter().all(|r| r.method.as_str() == "GET"));
}

#[tokio::test]
async fn failing_handler_is_reported_as_failed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent/job"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "j9", "message": "deploy"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/agent/jobs/j9/fail"))
        .and(body_json(json!({"result": "deploy script missing"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/agent/jobs/j9/succeed"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let handler = handler_fn(|_: &str, _: &str| -> Result<String, HandlerError> {
        Err("deploy script missing".into())
    });

    let mut worker = connect(&server);
    let outcome = worker.run_once(&handler).await.unwrap();

    assert_eq!(
        outcome,
        TickOutcome::Executed {
            job_id: "j9".to_string(),
            outcome: ExecutionOutcome::Failed("deploy script missing".to_string()),
        }
    );
    server.verify().await;
}

#[tokio::test]
async fn unauthorized_poll_stops_the_loop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent/job"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path_regex(r"^/agent/jobs/.*$"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let handler = handler_fn(|_: &str, _: &str| -> Result<String, HandlerError> {
        Ok("unreachable".to_string())
    });

    let mut worker = connect(&server);
    let result = tokio::time::timeout(
        Duration::from_secs(5),
        worker.run(&handler, CancellationToken::new()),
    )
    .await
    .expect("worker should stop on its own");

    assert!(matches!(result, Err(WorkerError::InvalidToken)));
    server.verify().await;
}

#[tokio::test]
async fn server_errors_do_not_stop_the_loop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent/job"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/agent/job"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "j2", "message": "uptime"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_no_job(&server).await;
    Mock::given(method("PUT"))
        .and(path("/agent/jobs/j2/succeed"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let handler = handler_fn(|_: &str, message: &str| -> Result<String, HandlerError> {
        Ok(format!("{} ok", message))
    });

    let mut worker = connect(&server);
    assert_eq!(worker.run_once(&handler).await.unwrap(), TickOutcome::Retry);
    assert_eq!(worker.run_once(&handler).await.unwrap(), TickOutcome::Retry);
    assert!(matches!(
        worker.run_once(&handler).await.unwrap(),
        TickOutcome::Executed { ref job_id, .. } if job_id == "j2"
    ));
    assert_eq!(worker.run_once(&handler).await.unwrap(), TickOutcome::NoJob);
    server.verify().await;
}

#[tokio::test]
async fn malformed_job_body_stops_the_loop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent/job"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let handler = handler_fn(|_: &str, _: &str| -> Result<String, HandlerError> {
        Ok(String::new())
    });

    let mut worker = connect(&server);
    let err = worker.run_once(&handler).await.unwrap_err();
    assert!(matches!(err, WorkerError::IncompatibleJob(_)));
}

#[tokio::test]
async fn slow_poll_times_out_as_transient() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent/job"))
        .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let handler = handler_fn(|_: &str, _: &str| -> Result<String, HandlerError> {
        Ok(String::new())
    });

    let mut worker = connect(&server);
    assert_eq!(worker.run_once(&handler).await.unwrap(), TickOutcome::Retry);
}

#[tokio::test]
async fn failed_report_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/agent/job"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "j3", "message": "x"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_no_job(&server).await;
    Mock::given(method("PUT"))
        .and(path("/agent/jobs/j3/succeed"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let calls = AtomicUsize::new(0);
    let handler = handler_fn(|_: &str, _: &str| -> Result<String, HandlerError> {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok("done".to_string())
    });

    let mut worker = connect(&server);
    assert!(matches!(
        worker.run_once(&handler).await.unwrap(),
        TickOutcome::Executed { .. }
    ));
    assert_eq!(worker.run_once(&handler).await.unwrap(), TickOutcome::NoJob);

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    server.verify().await;
}
