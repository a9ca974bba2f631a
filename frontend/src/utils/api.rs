use front_shared::HttpError;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;

async fn read_body(response: Response) -> Result<String, HttpError> {
    let body = response
        .text()
        .await
        .map_err(|e| HttpError::Transport(e.to_string()))?;
    if !response.ok() {
        return Err(HttpError::Status { code: response.status(), body });
    }
    Ok(body)
}

pub async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, HttpError> {
    let response = Request::get(url)
        .header("Accept", "application/json")
        .header("X-Requested-With", "XMLHttpRequest")
        .send()
        .await
        .map_err(|e| HttpError::Transport(e.to_string()))?;
    let body = read_body(response).await?;
    Ok(serde_json::from_str(&body)?)
}

pub async fn get_text(url: &str) -> Result<String, HttpError> {
    let response = Request::get(url)
        .header("X-Requested-With", "XMLHttpRequest")
        .send()
        .await
        .map_err(|e| HttpError::Transport(e.to_string()))?;
    read_body(response).await
}

pub async fn post_text(url: &str, body: String) -> Result<(), HttpError> {
    let response = Request::post(url)
        .header("X-Requested-With", "XMLHttpRequest")
        .header("Content-Type", "text/plain")
        .body(body)
        .map_err(|e| HttpError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| HttpError::Transport(e.to_string()))?;
    read_body(response).await.map(|_| ())
}
