//! # HTTP Client API
//!
//! Purpose: a facade over the `/api` HTTP surface, keeping the teacher's
//! `KVClient`/`ClientConfig` naming (`hkv-client/src/client.rs`) but
//! replacing pooled RESP2 TCP connections with a single shared
//! `reqwest::Client` (HTTP/1.1 keep-alive already gives connection reuse,
//! so no hand-rolled pool is needed here).

use kv_common::contracts::{
    AddDictionaryCacheValueContract, AddListCacheValueContract, CacheKeysContract,
    DictionaryCacheValueContract, DictionaryKeyValueContract, ListCacheValueContract,
    NewDictionaryCacheValuesContract, NewListCacheValuesContract, NewStringCacheValueContract,
    StringCacheValueContract, UpdateDictionaryCacheValueContract, UpdateListCacheValueContract,
    UpdateStringCacheValueContract,
};
use kv_common::error::ErrorContract;
use reqwest::{Response, StatusCode};

use crate::error::{ClientError, ClientResult};

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the server, e.g. "http://127.0.0.1:8080".
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
        }
    }
}

/// Facade over the cache engine's HTTP surface.
pub struct KVClient {
    http: reqwest::Client,
    base_url: String,
}

impl KVClient {
    pub fn connect(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> ClientResult<Self> {
        Ok(KVClient {
            http: reqwest::Client::new(),
            base_url: config.base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn error_from_response(response: Response) -> ClientError {
        let status = response.status().as_u16();
        match response.json::<ErrorContract>().await {
            Ok(body) => ClientError::Server {
                status,
                message: body.status,
            },
            Err(_) => ClientError::Server {
                status,
                message: "no error body".to_string(),
            },
        }
    }

    // -------------------------------------------------------------- string --

    pub async fn string_keys(&self) -> ClientResult<Vec<String>> {
        let response = self.http.get(self.url("/api/string")).send().await?;
        if response.status() == StatusCode::OK {
            Ok(response.json::<CacheKeysContract>().await?.keys)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn get_string(&self, key: &str) -> ClientResult<String> {
        let response = self.http.get(self.url(&format!("/api/string/{key}"))).send().await?;
        if response.status() == StatusCode::OK {
            Ok(response.json::<StringCacheValueContract>().await?.value)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn add_string(&self, key: &str, value: &str, ttl: Option<&str>) -> ClientResult<()> {
        let body = NewStringCacheValueContract {
            key: key.to_string(),
            value: value.to_string(),
            ttl: ttl.map(str::to_string),
        };
        let response = self.http.post(self.url("/api/string")).json(&body).send().await?;
        if response.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn update_string(&self, key: &str, value: &str, original: &str) -> ClientResult<()> {
        let body = UpdateStringCacheValueContract {
            value: value.to_string(),
            original: original.to_string(),
        };
        let response = self
            .http
            .put(self.url(&format!("/api/string/{key}")))
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn delete_string(&self, key: &str) -> ClientResult<()> {
        let response = self.http.delete(self.url(&format!("/api/string/{key}"))).send().await?;
        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    // ---------------------------------------------------------------- list --

    pub async fn list_keys(&self) -> ClientResult<Vec<String>> {
        let response = self.http.get(self.url("/api/list")).send().await?;
        if response.status() == StatusCode::OK {
            Ok(response.json::<CacheKeysContract>().await?.keys)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn get_list(&self, key: &str) -> ClientResult<Vec<String>> {
        let response = self.http.get(self.url(&format!("/api/list/{key}"))).send().await?;
        if response.status() == StatusCode::OK {
            Ok(response.json::<ListCacheValueContract>().await?.values)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn add_list(&self, key: &str, values: Vec<String>, ttl: Option<&str>) -> ClientResult<()> {
        let body = NewListCacheValuesContract {
            key: key.to_string(),
            values,
            ttl: ttl.map(str::to_string),
        };
        let response = self.http.post(self.url("/api/list")).json(&body).send().await?;
        if response.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn add_list_value(&self, key: &str, value: &str) -> ClientResult<()> {
        let body = AddListCacheValueContract {
            value: value.to_string(),
        };
        let response = self
            .http
            .post(self.url(&format!("/api/list/{key}")))
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn update_list_value(&self, key: &str, original: &str, new_value: &str) -> ClientResult<()> {
        let body = UpdateListCacheValueContract {
            value: new_value.to_string(),
        };
        let response = self
            .http
            .put(self.url(&format!("/api/list/{key}/{original}")))
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn delete_list(&self, key: &str) -> ClientResult<()> {
        let response = self.http.delete(self.url(&format!("/api/list/{key}"))).send().await?;
        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn delete_list_value(&self, key: &str, value: &str) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/list/{key}/{value}")))
            .send()
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    // ---------------------------------------------------------- dictionary --

    pub async fn dictionary_keys(&self) -> ClientResult<Vec<String>> {
        let response = self.http.get(self.url("/api/dictionary")).send().await?;
        if response.status() == StatusCode::OK {
            Ok(response.json::<CacheKeysContract>().await?.keys)
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn get_dictionary(&self, key: &str) -> ClientResult<Vec<(String, String)>> {
        let response = self.http.get(self.url(&format!("/api/dictionary/{key}"))).send().await?;
        if response.status() == StatusCode::OK {
            let body = response.json::<DictionaryCacheValueContract>().await?;
            Ok(body.values.into_iter().map(|pair| (pair.key, pair.value)).collect())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn add_dictionary(
        &self,
        key: &str,
        values: Vec<(String, String)>,
        ttl: Option<&str>,
    ) -> ClientResult<()> {
        let body = NewDictionaryCacheValuesContract {
            key: key.to_string(),
            values: values
                .into_iter()
                .map(|(key, value)| DictionaryKeyValueContract { key, value })
                .collect(),
            ttl: ttl.map(str::to_string),
        };
        let response = self.http.post(self.url("/api/dictionary")).json(&body).send().await?;
        if response.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn add_dictionary_value(&self, key: &str, subkey: &str, value: &str) -> ClientResult<()> {
        let body = AddDictionaryCacheValueContract {
            value: DictionaryKeyValueContract {
                key: subkey.to_string(),
                value: value.to_string(),
            },
        };
        let response = self
            .http
            .post(self.url(&format!("/api/dictionary/{key}")))
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::CREATED {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn update_dictionary_value(
        &self,
        key: &str,
        subkey: &str,
        new_value: &str,
        original: &str,
    ) -> ClientResult<()> {
        let body = UpdateDictionaryCacheValueContract {
            value: new_value.to_string(),
            original: original.to_string(),
        };
        let response = self
            .http
            .put(self.url(&format!("/api/dictionary/{key}/{subkey}")))
            .json(&body)
            .send()
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn delete_dictionary(&self, key: &str) -> ClientResult<()> {
        let response = self.http.delete(self.url(&format!("/api/dictionary/{key}"))).send().await?;
        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }

    pub async fn delete_dictionary_value(&self, key: &str, subkey: &str) -> ClientResult<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/dictionary/{key}/{subkey}")))
            .send()
            .await?;
        if response.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(Self::error_from_response(response).await)
        }
    }
}
