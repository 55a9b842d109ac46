use super::{AnalysisRequest, AnalysisResponse};
use crate::{conf::Conf, Error, Result};
use reqwest::Response;
use serde_json::Value;
use tracing::{info, warn};
use url::Url;

const PROCESS_PATH: &str = "process";

pub struct AnalysisClient {
    http: reqwest::Client,
    process_url: Url,
}

impl AnalysisClient {
    pub fn new(conf: &Conf) -> Result<AnalysisClient> {
        Ok(AnalysisClient {
            http: reqwest::Client::new(),
            process_url: conf.backend_url.join(PROCESS_PATH)?,
        })
    }

    pub fn process_url(&self) -> &Url {
        &self.process_url
    }

    pub async fn process(&self, req: &AnalysisRequest) -> Result<AnalysisResponse> {
        info!(url = self.process_url.as_str(), bounds = ?req.bounds, "Submitting region");
        let res = self
            .http
            .post(self.process_url.clone())
            .json(req)
            .send()
            .await?;
        info!(http_status_code = ?res.status(), "Got analysis response");
        _process(res).await
    }
}

async fn _process(res: Response) -> Result<AnalysisResponse> {
    let status = res.status();
    let body: Value = res.json().await?;
    let res = AnalysisResponse::from_json(body)?;
    if !status.is_success() {
        if res.error.is_none() {
            Err(Error::InvalidResponse(format!(
                "Unexpected response status: {status}"
            )))?
        }
        warn!(http_status_code = ?status, "Backend reported an error with a non-success status");
    }
    Ok(res)
}

#[cfg(test)]
mod test {
    use crate::{test::mock_conf, Error};
    use http::response::Builder;

    #[test]
    fn process_url() {
        let client = super::AnalysisClient::new(&mock_conf("http://10.0.0.2:8000")).unwrap();
        assert_eq!("http://10.0.0.2:8000/process", client.process_url().as_str());
        let client = super::AnalysisClient::new(&mock_conf("http://host/api/")).unwrap();
        assert_eq!("http://host/api/process", client.process_url().as_str());
    }

    #[actix_web::test]
    async fn process_ok() {
        let res = Builder::new()
            .status(200)
            .body(r#"{ "landcover": "static/landcover.tif" }"#)
            .unwrap();
        let res = super::_process(res.into()).await.unwrap();
        assert!(res.error.is_none());
        assert!(res.landcover.as_present().is_some());
    }

    #[actix_web::test]
    async fn process_server_error() {
        let res = Builder::new()
            .status(200)
            .body(r#"{ "error": "Landcover export failed" }"#)
            .unwrap();
        let res = super::_process(res.into()).await.unwrap();
        assert_eq!(Some("Landcover export failed".to_string()), res.error);
    }

    #[actix_web::test]
    async fn process_error_with_failure_status() {
        let res = Builder::new()
            .status(500)
            .body(r#"{ "error": "bad bounds" }"#)
            .unwrap();
        let res = super::_process(res.into()).await.unwrap();
        assert_eq!(Some("bad bounds".to_string()), res.error);
    }

    #[actix_web::test]
    async fn process_failure_status_without_error() {
        let res = Builder::new()
            .status(400)
            .body(r#"{ "detail": "Invalid request. 'bounds' key is missing." }"#)
            .unwrap();
        let res = super::_process(res.into()).await;
        assert!(matches!(res, Err(Error::InvalidResponse(_))));
    }

    #[actix_web::test]
    async fn process_not_json() {
        let res = Builder::new()
            .status(502)
            .body("<html>Bad Gateway</html>")
            .unwrap();
        let res = super::_process(res.into()).await;
        assert!(matches!(res, Err(Error::Reqwest(_))));
    }

    #[actix_web::test]
    async fn process_not_object() {
        let res = Builder::new().status(200).body("[]").unwrap();
        let res = super::_process(res.into()).await;
        assert!(matches!(res, Err(Error::InvalidResponse(_))));
    }
}
