use async_trait::async_trait;

use crate::error::RemoteError;
use crate::remote::{Record, RecordId};
use crate::resource::Resource;
use crate::traits::RecordStore;

/// A [`RecordStore`] that `PUT`s every record as JSON to `<base>/<record_type>/<record_id>`
#[derive(Debug)]
pub struct HttpRecordStore {
    resource: Resource,
    client: reqwest::Client,
}

impl HttpRecordStore {
    pub fn new(resource: Resource) -> Self {
        Self {
            resource,
            client: reqwest::Client::new(),
        }
    }

    /// Use a custom HTTP client, e.g. one with specific timeouts or proxy settings
    pub fn with_client(resource: Resource, client: reqwest::Client) -> Self {
        Self { resource, client }
    }

    pub fn resource(&self) -> &Resource {
        &self.resource
    }
}

#[async_trait]
impl RecordStore for HttpRecordStore {
    async fn upsert(&self, record: Record) -> Result<RecordId, RemoteError> {
        let url = self.resource.record_url(record.record_type(), record.id().as_str())?;

        let response = self.client
            .put(url)
            .basic_auth(self.resource.username(), Some(self.resource.password()))
            .json(record.fields())
            .send()
            .await?;

        if response.status().is_success() == false {
            return Err(RemoteError::Status(response.status()));
        }

        Ok(record.id().clone())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use crate::task::{Task, Timeframe};

    /// Serve one connection with a canned response, and hand back the raw request that was received
    async fn serve_once(status_line: &'static str) -> (url::Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}/db", listener.local_addr().unwrap()).parse().unwrap();

        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if is_complete(&request) {
                    break;
                }
            }

            let response = format!("{}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n", status_line);
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            String::from_utf8(request).unwrap()
        });

        (base, server)
    }

    /// Whether the headers and the whole body (as announced by Content-Length) have been received
    fn is_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let header_end = match text.find("\r\n\r\n") {
            None => return false,
            Some(pos) => pos,
        };
        let content_length = text[..header_end].lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    fn store_at(base: url::Url) -> HttpRecordStore {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        HttpRecordStore::with_client(Resource::new(base, "alice".to_string(), "s3cret".to_string()), client)
    }

    fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
        head.lines()
            .skip(1)
            .filter_map(|line| line.split_once(':'))
            .find(|(n, _)| n.trim().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.trim())
    }

    #[tokio::test]
    async fn upsert_puts_the_record() {
        let (base, server) = serve_once("HTTP/1.1 201 Created").await;
        let store = store_at(base);

        let mut task = Task::new(7, "Buy stamps".to_string(), Some("a whole booklet".to_string()), Timeframe::EndOfWeek);
        task.toggle_completion();
        let record = Record::from_task_with_type(&task, "task".to_string());

        let id = store.upsert(record).await.unwrap();
        assert_eq!(id.as_str(), "task-7");

        let request = server.await.unwrap();
        let (head, body) = request.split_once("\r\n\r\n").unwrap();
        assert_eq!(head.lines().next(), Some("PUT /db/task/task-7 HTTP/1.1"));
        // base64("alice:s3cret")
        assert_eq!(header(head, "authorization"), Some("Basic YWxpY2U6czNjcmV0"));
        assert_eq!(header(head, "content-type"), Some("application/json"));

        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body, serde_json::json!({
            "id": 7,
            "timeframe": "endOfWeek",
            "text": "Buy stamps",
            "details": "a whole booklet",
            "completed": true,
        }));
    }

    #[tokio::test]
    async fn server_errors_are_reported() {
        let (base, server) = serve_once("HTTP/1.1 500 Internal Server Error").await;
        let store = store_at(base);

        let task = Task::new(1, "x".to_string(), None, Timeframe::Today);
        match store.upsert(Record::from_task_with_type(&task, "task".to_string())).await {
            Err(RemoteError::Status(status)) => assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR),
            other => panic!("Unexpected result {:?}", other),
        }
        server.await.unwrap();
    }
}
