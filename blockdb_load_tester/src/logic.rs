use blockdb_common::errors::SetupError;
use blockdb_common::operations::Operation;
use futures::future::join_all;
use reqwest::{Client, Response, StatusCode, Url};
use std::fmt;
use std::time::{Duration, Instant};

/// **What happened to a single request**
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Status below 400
    Success(StatusCode),
    /// Status 400 or above
    Error(StatusCode),
    /// Transport failure or timeout; nothing came back
    NoResponse,
}

/// **Buckets a response by its status code**
///
/// `None` stands for a request that never got a response.
pub fn classify(status: Option<StatusCode>) -> Outcome {
    match status {
        None => Outcome::NoResponse,
        Some(status) if status.as_u16() >= 400 => Outcome::Error(status),
        Some(status) => Outcome::Success(status),
    }
}

/// A single POST to be sent: the full URL and the body
#[derive(Clone, Debug)]
pub struct PlannedRequest<'a> {
    pub url: Url,
    pub operation: &'a Operation,
}

/// **Pairs every URL with an operation**
///
/// The URL list is `base_urls` repeated `rounds` times; operations are
/// cycled round-robin over it. Yields nothing if there are no operations.
///
/// # Errors
/// - `base_urls.len() * rounds` overflows, `SetupError::TooManyRequests`;
/// - An operation path can't be joined, `SetupError::Url`.
pub fn plan_requests<'a>(
    base_urls: &[Url],
    rounds: usize,
    operations: &'a [Operation],
) -> Result<Vec<PlannedRequest<'a>>, SetupError> {
    let total = base_urls
        .len()
        .checked_mul(rounds)
        .ok_or(SetupError::TooManyRequests(base_urls.len(), rounds))?;

    base_urls
        .iter()
        .cycle()
        .take(total)
        .zip(operations.iter().cycle())
        .map(|(base_url, operation)| {
            Ok(PlannedRequest {
                url: base_url.join(operation.path())?,
                operation,
            })
        })
        .collect()
}

/// **Sends every planned request concurrently and waits for all of them**
///
/// The outcomes are in the same order as `plan`.
pub async fn send_all(client: &Client, plan: &[PlannedRequest<'_>]) -> Vec<Outcome> {
    let requests = plan.iter().map(|request| async move {
        let response: Result<Response, reqwest::Error> = client
            .post(request.url.clone())
            .json(request.operation)
            .send()
            .await;

        match response {
            Ok(response) => {
                log::debug!("{} -> {}", request.url, response.status());
                classify(Some(response.status()))
            }
            Err(err) => {
                log::debug!("{} -> no response: {}", request.url, err);
                classify(None)
            }
        }
    });

    join_all(requests).await
}

/// **Summary of a load run**
#[derive(Clone, Debug, PartialEq)]
pub struct LoadReport {
    pub elapsed: Duration,
    pub total: usize,
    pub error_indices: Vec<usize>,
    pub none_indices: Vec<usize>,
}

impl LoadReport {
    pub fn from_outcomes(outcomes: &[Outcome], elapsed: Duration) -> Self {
        let mut error_indices = vec![];
        let mut none_indices = vec![];

        for (i, outcome) in outcomes.iter().enumerate() {
            match outcome {
                Outcome::Success(_) => {}
                Outcome::Error(_) => error_indices.push(i),
                Outcome::NoResponse => none_indices.push(i),
            }
        }

        Self {
            elapsed,
            total: outcomes.len(),
            error_indices,
            none_indices,
        }
    }

    pub fn successful(&self) -> usize {
        self.total - self.error_indices.len() - self.none_indices.len()
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Time taken : {:.3}s", self.elapsed.as_secs_f64())?;
        writeln!(f, "Total Sent {}", self.total)?;
        writeln!(f, "Total Successful {}", self.successful())?;
        writeln!(f, "Indices of errored requests {:?}", self.error_indices)?;
        write!(f, "Indices of requests not returned {:?}", self.none_indices)
    }
}

/// **Builds the shared HTTP client**
///
/// Without a timeout, a request waits as long as the server holds it.
pub fn build_client(timeout: Option<Duration>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent("blockdb_load_tester");
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build()
}

/// **Runs one load batch end to end**
///
/// Plans, sends, times and summarizes. Only setup problems are errors;
/// failed requests end up in the report.
pub async fn run_load(
    client: &Client,
    base_urls: &[Url],
    rounds: usize,
    operations: &[Operation],
) -> Result<LoadReport, SetupError> {
    let plan = plan_requests(base_urls, rounds, operations)?;
    log::info!(
        "Sending {} requests to {} servers",
        plan.len(),
        base_urls.len()
    );

    let start = Instant::now();
    let outcomes = send_all(client, &plan).await;
    let report = LoadReport::from_outcomes(&outcomes, start.elapsed());

    log::info!(
        "Done: {} successful, {} errors, {} without a response",
        report.successful(),
        report.error_indices.len(),
        report.none_indices.len()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockdb_common::operations::sample_operations;

    fn urls() -> Vec<Url> {
        ["http://127.0.0.1:8080/", "http://127.0.0.1:8081/"]
            .iter()
            .map(|u| Url::parse(u).unwrap())
            .collect()
    }

    #[test]
    fn test_classify_success() {
        assert_eq!(Outcome::Success(StatusCode::OK), classify(Some(StatusCode::OK)));
        assert_eq!(
            Outcome::Success(StatusCode::CREATED),
            classify(Some(StatusCode::CREATED))
        );
        assert_eq!(
            Outcome::Success(StatusCode::PERMANENT_REDIRECT),
            classify(Some(StatusCode::PERMANENT_REDIRECT))
        );
    }

    #[test]
    fn test_classify_error_from_400() {
        assert_eq!(
            Outcome::Error(StatusCode::BAD_REQUEST),
            classify(Some(StatusCode::BAD_REQUEST))
        );
        assert_eq!(
            Outcome::Error(StatusCode::INTERNAL_SERVER_ERROR),
            classify(Some(StatusCode::INTERNAL_SERVER_ERROR))
        );
    }

    #[test]
    fn test_classify_none() {
        assert_eq!(Outcome::NoResponse, classify(None));
    }

    #[test]
    fn test_plan_pairs_round_robin() {
        let ops = sample_operations();
        let plan = plan_requests(&urls(), 3, &ops).unwrap();

        assert_eq!(6, plan.len());
        assert_eq!("http://127.0.0.1:8080/set", plan[0].url.as_str());
        assert_eq!("http://127.0.0.1:8081/set", plan[1].url.as_str());
        assert_eq!("http://127.0.0.1:8080/set", plan[2].url.as_str());
        for (i, request) in plan.iter().enumerate() {
            assert_eq!(&ops[i], request.operation);
        }
    }

    #[test]
    fn test_plan_wraps_operations() {
        let ops = sample_operations();
        let plan = plan_requests(&urls(), 20, &ops).unwrap();

        assert_eq!(40, plan.len());
        assert_eq!(&ops[0], plan[35].operation);
        assert_eq!("http://127.0.0.1:8081/increase", plan[13].url.as_str());
        assert_eq!("http://127.0.0.1:8080/batch", plan[34].url.as_str());
    }

    #[test]
    fn test_plan_empty() {
        assert!(plan_requests(&urls(), 0, &sample_operations()).unwrap().is_empty());
        assert!(plan_requests(&urls(), 5, &[]).unwrap().is_empty());
        assert!(plan_requests(&[], 5, &sample_operations()).unwrap().is_empty());
    }

    #[test]
    fn test_plan_too_many_rounds() {
        assert_eq!(
            Some(SetupError::TooManyRequests(2, usize::MAX)),
            plan_requests(&urls(), usize::MAX, &sample_operations()).err()
        );
    }

    #[test]
    fn test_report_buckets() {
        let outcomes = [
            Outcome::Success(StatusCode::OK),
            Outcome::Error(StatusCode::NOT_FOUND),
            Outcome::NoResponse,
            Outcome::Success(StatusCode::CREATED),
            Outcome::Error(StatusCode::BAD_GATEWAY),
            Outcome::NoResponse,
        ];
        let report = LoadReport::from_outcomes(&outcomes, Duration::from_millis(1500));

        assert_eq!(6, report.total);
        assert_eq!(2, report.successful());
        assert_eq!(vec![1, 4], report.error_indices);
        assert_eq!(vec![2, 5], report.none_indices);
    }

    #[test]
    fn test_report_display() {
        let report = LoadReport::from_outcomes(
            &[Outcome::Success(StatusCode::OK), Outcome::NoResponse],
            Duration::from_millis(1500),
        );
        let expected = "Time taken : 1.500s\n\
                        Total Sent 2\n\
                        Total Successful 1\n\
                        Indices of errored requests []\n\
                        Indices of requests not returned [1]";
        assert_eq!(expected, report.to_string());
    }
}
