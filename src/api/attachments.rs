use crate::{Client, Response, Result};
use bytes::Bytes;
use http::Method;

impl Client {
    /// Downloads the content of an attachment.
    ///
    /// The whole attachment is read into memory. If the connection fails
    /// part-way through, the read error is returned rather than a truncated
    /// payload.
    pub async fn download_attachment(&self, attachment_id: &str) -> Result<Response<Bytes>> {
        let request = self.request(Method::GET, &format!("/v1/attachments/{}", attachment_id))?;
        self.send_bytes(request).await
    }
}
