use serde::{Deserialize, Serialize};

/// Single resource wrapped the way the client API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractalItem<T> {
    pub object: String,
    pub attributes: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FractalList<T> {
    pub object: String,
    pub data: Vec<FractalItem<T>>,
}

impl<T> FractalList<T> {
    pub fn into_attributes(self) -> Vec<T> {
        self.data.into_iter().map(|item| item.attributes).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsocketCredentials {
    pub token: String,
    pub socket: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsocketCredentialsResponse {
    pub data: WebsocketCredentials,
}
