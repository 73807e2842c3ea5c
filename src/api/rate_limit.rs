use crate::rate_limit::{Rate, RateLimitPayload};
use crate::{Client, Response, Result};
use http::Method;

impl Client {
    /// Fetches the current rate limit counters.
    ///
    /// This endpoint is not guaranteed to send the `X-Ratelimit-*` headers,
    /// so both the payload and [`Response::rate`] hold the counters from the
    /// body.
    pub async fn rate_limit(&self) -> Result<Response<Rate>> {
        let request = self.request(Method::GET, "/v1/rate_limit")?;
        let response = self.send_json::<RateLimitPayload>(request).await?;

        let mut response = response.map(Rate::from);
        response.rate = response.data;
        Ok(response)
    }
}
