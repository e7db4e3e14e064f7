//! HTTP client for the user and product services.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::GatewayError;
use crate::models::{CartContents, OrderRequest, Product, ProductDraft, ProductId, Profile, Role};
use crate::session::AuthSession;

/// Per-request timeout. A hung call settles as a network error instead of
/// leaving its pending marker set forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The POST /login response body. The service answers 200 with no token on
/// bad credentials, so the field is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
}

/// The POST /signup request body.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub phone: String,
    pub role: Role,
}

/// Stateless HTTP wrappers for every remote endpoint the client consumes.
///
/// Holds one `reqwest::Client` plus the two service base URLs. Each method
/// is a single request/response exchange; authenticated calls take the
/// session explicitly.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    http: reqwest::Client,
    user_base: String,
    product_base: String,
}

impl ApiGateway {
    pub fn new(
        user_base: impl Into<String>,
        product_base: impl Into<String>,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        Ok(Self {
            http,
            user_base: user_base.into(),
            product_base: product_base.into(),
        })
    }

    /// Builds a user-service URL for a given path.
    fn user_url(&self, path: &str) -> String {
        format!("{}{}", self.user_base.trim_end_matches('/'), path)
    }

    /// Builds a product-service URL for a given path.
    fn product_url(&self, path: &str) -> String {
        format!("{}{}", self.product_base.trim_end_matches('/'), path)
    }

    // --- auth ---

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, GatewayError> {
        let response = self
            .http
            .post(self.user_url("/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_json(response).await
    }

    pub async fn signup(&self, request: &SignupRequest) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.user_url("/signup"))
            .json(request)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_ok(response).await
    }

    pub async fn profile(&self, session: &AuthSession) -> Result<Profile, GatewayError> {
        let response = self
            .http
            .get(self.user_url("/profile"))
            .header("Authorization", session.bearer())
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_json(response).await
    }

    // --- catalog ---

    pub async fn products_by_category(
        &self,
        session: &AuthSession,
        category: &str,
    ) -> Result<Vec<Product>, GatewayError> {
        let response = self
            .http
            .get(self.product_url(&format!("/category/{}", category)))
            .header("Authorization", session.bearer())
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_json(response).await
    }

    pub async fn product(
        &self,
        session: &AuthSession,
        id: &ProductId,
    ) -> Result<Product, GatewayError> {
        let response = self
            .http
            .get(self.product_url(&format!("/{}", id)))
            .header("Authorization", session.bearer())
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_json(response).await
    }

    pub async fn create_product(
        &self,
        session: &AuthSession,
        draft: &ProductDraft,
    ) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.product_url("/product/create"))
            .header("Authorization", session.bearer())
            .json(draft)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_ok(response).await
    }

    pub async fn update_product(
        &self,
        session: &AuthSession,
        id: &ProductId,
        draft: &ProductDraft,
    ) -> Result<(), GatewayError> {
        let response = self
            .http
            .put(self.product_url(&format!("/product/{}", id)))
            .header("Authorization", session.bearer())
            .json(draft)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_ok(response).await
    }

    // --- cart ---

    pub async fn cart(&self, session: &AuthSession) -> Result<CartContents, GatewayError> {
        let response = self
            .http
            .get(self.user_url("/cart"))
            .header("Authorization", session.bearer())
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_json(response).await
    }

    pub async fn add_to_cart(
        &self,
        session: &AuthSession,
        id: &ProductId,
        quantity: u32,
    ) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.user_url("/cart/add"))
            .header("Authorization", session.bearer())
            .json(&serde_json::json!({ "productId": id, "quantity": quantity }))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_ok(response).await
    }

    pub async fn remove_from_cart(
        &self,
        session: &AuthSession,
        id: &ProductId,
    ) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.user_url("/cart/remove"))
            .header("Authorization", session.bearer())
            .json(&serde_json::json!({ "productId": id }))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_ok(response).await
    }

    // --- wishlist ---

    pub async fn add_to_wishlist(
        &self,
        session: &AuthSession,
        id: &ProductId,
    ) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.user_url("/wishlist"))
            .header("Authorization", session.bearer())
            .json(&serde_json::json!({ "productId": id }))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_ok(response).await
    }

    pub async fn remove_from_wishlist(
        &self,
        session: &AuthSession,
        id: &ProductId,
    ) -> Result<(), GatewayError> {
        let response = self
            .http
            .delete(self.user_url("/wishlist"))
            .header("Authorization", session.bearer())
            .json(&serde_json::json!({ "productId": id }))
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_ok(response).await
    }

    // --- orders ---

    pub async fn place_order(
        &self,
        session: &AuthSession,
        order: &OrderRequest,
    ) -> Result<(), GatewayError> {
        let response = self
            .http
            .post(self.user_url("/order"))
            .header("Authorization", session.bearer())
            .json(order)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        expect_ok(response).await
    }
}

/// Decode a 2xx body as JSON, or map the failure status.
async fn expect_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Body(e.to_string()))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::from_status(status.as_u16(), &body))
    }
}

/// Accept any 2xx, discarding the body; map the failure status otherwise.
async fn expect_ok(response: reqwest::Response) -> Result<(), GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::from_status(status.as_u16(), &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> ApiGateway {
        ApiGateway::new(
            "https://users.example.com/",
            "https://products.example.com",
        )
        .unwrap()
    }

    #[test]
    fn test_user_url_trims_trailing_slash() {
        let gw = gateway();
        assert_eq!(gw.user_url("/login"), "https://users.example.com/login");
        assert_eq!(gw.user_url("/cart/add"), "https://users.example.com/cart/add");
    }

    #[test]
    fn test_product_url_paths() {
        let gw = gateway();
        assert_eq!(
            gw.product_url("/category/Fashion"),
            "https://products.example.com/category/Fashion"
        );
        assert_eq!(
            gw.product_url("/product/abc"),
            "https://products.example.com/product/abc"
        );
        assert_eq!(gw.product_url("/abc"), "https://products.example.com/abc");
    }

    #[test]
    fn test_login_response_without_token() {
        let parsed: LoginResponse = serde_json::from_str(r#"{"message": "bad credentials"}"#).unwrap();
        assert!(parsed.token.is_none());

        let parsed: LoginResponse = serde_json::from_str(r#"{"token": "t1"}"#).unwrap();
        assert_eq!(parsed.token.as_deref(), Some("t1"));
    }

    #[test]
    fn test_signup_request_serializes_role_name() {
        let request = SignupRequest {
            email: "a@b.com".to_string(),
            password: "secret".to_string(),
            phone: "555-0100".to_string(),
            role: Role::Seller,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["role"], "Seller");
        assert_eq!(json["email"], "a@b.com");
    }
}
