use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

use crate::domain::{LookupError, OfficialResult, NUMBERS_PER_ENTRY};

use super::config::TerminalConfig;

/// Source of official draw results
#[async_trait]
pub trait ResultGateway: Send + Sync {
    /// Fetches the result for `round`.
    ///
    /// Every failure, including transport errors, is reported as
    /// [`LookupError::Unavailable`].
    async fn fetch_result(&self, round: u32) -> Result<OfficialResult, LookupError>;
}

/// Draw record as served by the result endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct LottoNumberRecord {
    #[serde(rename = "returnValue", default)]
    pub return_value: Option<String>,
    #[serde(rename = "drwNo")]
    pub draw_no: u32,
    #[serde(rename = "drwtNo1")]
    pub number1: u8,
    #[serde(rename = "drwtNo2")]
    pub number2: u8,
    #[serde(rename = "drwtNo3")]
    pub number3: u8,
    #[serde(rename = "drwtNo4")]
    pub number4: u8,
    #[serde(rename = "drwtNo5")]
    pub number5: u8,
    #[serde(rename = "drwtNo6")]
    pub number6: u8,
    #[serde(rename = "bnusNo")]
    pub bonus_number: u8,
}

impl LottoNumberRecord {
    const FAILURE: &'static str = "fail";

    pub fn winning_numbers(&self) -> [u8; NUMBERS_PER_ENTRY] {
        [
            self.number1,
            self.number2,
            self.number3,
            self.number4,
            self.number5,
            self.number6,
        ]
    }

    /// Validates the record against the round that was asked for
    pub fn into_result(self, requested_round: u32) -> Result<OfficialResult, LookupError> {
        if self.return_value.as_deref() == Some(Self::FAILURE) {
            return Err(LookupError::Unavailable);
        }

        if self.draw_no != requested_round {
            warn!(
                "result service answered round {} for round {}",
                self.draw_no, requested_round
            );
            return Err(LookupError::Unavailable);
        }

        let winning_numbers = self.winning_numbers();

        // all zeros: round not drawn yet
        if winning_numbers.iter().all(|n| *n == 0) {
            debug!("round {} has not been drawn yet", requested_round);
            return Err(LookupError::Unavailable);
        }

        let mut sorted = winning_numbers;
        sorted.sort_unstable();
        if sorted.windows(2).any(|pair| pair[0] == pair[1]) {
            warn!("round {} has repeated winning numbers", requested_round);
            return Err(LookupError::Unavailable);
        }

        Ok(OfficialResult::new(
            self.draw_no,
            winning_numbers,
            self.bonus_number,
        ))
    }
}

#[derive(Debug, Error)]
enum FetchFailure {
    #[error("transport: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Gateway backed by the official HTTP endpoint
pub struct HttpResultGateway {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpResultGateway {
    const METHOD: &'static str = "getLottoNumber";

    pub fn new(config: &TerminalConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    async fn fetch_record(&self, round: u32) -> Result<LottoNumberRecord, FetchFailure> {
        let round = round.to_string();
        let body = self
            .client
            .get(&self.endpoint)
            .query(&[("method", Self::METHOD), ("drwNo", round.as_str())])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        // The service does not reliably label its body as JSON.
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ResultGateway for HttpResultGateway {
    async fn fetch_result(&self, round: u32) -> Result<OfficialResult, LookupError> {
        debug!("fetching result for round {}", round);

        let record = self.fetch_record(round).await.map_err(|err| {
            warn!("lookup for round {} failed: {}", round, err);
            LookupError::Unavailable
        })?;

        record.into_result(round)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    fn decode(body: &str) -> Result<LottoNumberRecord, serde_json::Error> {
        serde_json::from_str(body)
    }

    const ROUND_1125: &str = r#"{
        "totSellamnt": 118628811000,
        "returnValue": "success",
        "drwNoDate": "2024-06-22",
        "firstWinamnt": 2147483647,
        "drwtNo6": 45,
        "drwtNo4": 33,
        "firstPrzwnerCo": 12,
        "drwtNo5": 37,
        "bnusNo": 28,
        "firstAccumamnt": 26000000000,
        "drwNo": 1125,
        "drwtNo2": 13,
        "drwtNo3": 20,
        "drwtNo1": 6
    }"#;

    #[test]
    fn test_decode_and_validate() {
        let result = decode(ROUND_1125).unwrap().into_result(1125).unwrap();

        assert_eq!(result.round, 1125);
        assert_eq!(result.winning_numbers, [6, 13, 20, 33, 37, 45]);
        assert_eq!(result.bonus_number, 28);
    }

    #[test]
    fn test_round_mismatch_is_unavailable() {
        let record = decode(ROUND_1125).unwrap();
        assert_eq!(record.into_result(1126), Err(LookupError::Unavailable));
    }

    #[test]
    fn test_undrawn_round_is_unavailable() {
        let record = decode(
            r#"{"drwNo":1200,"drwtNo1":0,"drwtNo2":0,"drwtNo3":0,"drwtNo4":0,"drwtNo5":0,"drwtNo6":0,"bnusNo":0}"#,
        )
        .unwrap();
        assert_eq!(record.into_result(1200), Err(LookupError::Unavailable));
    }

    #[test]
    fn test_repeated_winning_numbers_are_unavailable() {
        let record = decode(
            r#"{"drwNo":10,"drwtNo1":1,"drwtNo2":1,"drwtNo3":2,"drwtNo4":3,"drwtNo5":4,"drwtNo6":5,"bnusNo":6}"#,
        )
        .unwrap();
        assert_eq!(record.into_result(10), Err(LookupError::Unavailable));
    }

    #[test]
    fn test_failure_body_does_not_decode() {
        assert!(decode(r#"{"returnValue":"fail"}"#).is_err());
    }

    // ==================== HTTP ====================

    fn gateway(endpoint: String) -> HttpResultGateway {
        let config = TerminalConfig {
            endpoint,
            ..TerminalConfig::default()
        };
        HttpResultGateway::new(&config).unwrap()
    }

    /// Answers a single request with `response` and yields its request line
    async fn serve_once(response: String) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/common.do", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();

            let request = String::from_utf8(request).unwrap();
            request.lines().next().unwrap_or_default().to_string()
        });

        (endpoint, handle)
    }

    fn reply(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn test_refused_connection_is_unavailable() {
        let gateway = gateway("http://127.0.0.1:1/common.do".to_string());
        assert_eq!(
            gateway.fetch_result(1125).await,
            Err(LookupError::Unavailable)
        );
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let (endpoint, server) = serve_once(reply("500 Internal Server Error", "")).await;

        let result = gateway(endpoint).fetch_result(1125).await;
        assert_eq!(result, Err(LookupError::Unavailable));
        assert_eq!(
            server.await.unwrap(),
            "GET /common.do?method=getLottoNumber&drwNo=1125 HTTP/1.1"
        );
    }

    #[tokio::test]
    async fn test_unlabelled_json_body_is_decoded() {
        let (endpoint, server) = serve_once(reply("200 OK", ROUND_1125)).await;

        let result = gateway(endpoint).fetch_result(1125).await.unwrap();
        assert_eq!(result.winning_numbers, [6, 13, 20, 33, 37, 45]);
        assert_eq!(result.bonus_number, 28);
        assert!(server.await.unwrap().ends_with("drwNo=1125 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_html_body_is_unavailable() {
        let (endpoint, _server) = serve_once(reply("200 OK", "<html>점검 중</html>")).await;

        assert_eq!(
            gateway(endpoint).fetch_result(1125).await,
            Err(LookupError::Unavailable)
        );
    }
}
