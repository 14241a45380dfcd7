//! Fixture lifecycle: scoped resources with guaranteed teardown
//!
//! A fixture moves through create → yield to test body → teardown.
//! The scoped runners ([`with_user`], [`with_product`]) catch a
//! panicking test body, issue the delete with freshly fetched admin
//! authority, and resume the unwind, so the delete fires exactly once
//! per created resource on every exit path. If setup itself fails no id
//! was captured and there is nothing to tear down.

use futures::FutureExt;
use serde_json::{json, Value};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{error, info};

use crate::auth::admin_token;
use crate::client::{ApiRequest, ApiResponse};
use crate::context::SuiteContext;
use crate::error::{ApiError, ApiResult};
use storecheck_common::random;

/// A registered throwaway user, owned by the test that created it
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A created catalog product plus the artifacts its tests assert on
#[derive(Debug, Clone)]
pub struct TestProduct {
    pub id: i64,
    pub payload: Value,
    pub token: String,
    pub create_response: ApiResponse,
}

/// The payload every product fixture submits
pub fn fixture_product_payload() -> Value {
    json!({
        "name": "Fixture Product",
        "image": "/images/test_fixture.jpg",
        "brand": "BrandFixture",
        "category": "CategoryFixture",
        "description": "Created from fixture",
        "price": "99.99",
        "countInStock": 5
    })
}

/// Register a user with random identity data. Registration needs no
/// auth; the server assigns the integer id.
pub async fn create_user(ctx: &SuiteContext) -> ApiResult<TestUser> {
    let name = random::random_name();
    let email = random::random_email();
    let password = random::default_password();
    let payload = json!({"name": name, "email": email, "password": password});

    let response = ctx
        .client
        .send(ApiRequest::post(&ctx.config.end_points.register_user_endpoint).json(payload))
        .await?;
    assert_eq!(
        response.status().as_u16(),
        200,
        "user fixture setup failed with status: {}",
        response.status()
    );

    let id = response
        .json()?
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::Fixture("register response missing integer id".to_string()))?;

    Ok(TestUser {
        id,
        name,
        email,
        password,
    })
}

/// Delete a user through the API with fresh admin authority
pub async fn delete_user(ctx: &SuiteContext, id: i64) -> ApiResult<ApiResponse> {
    let token = admin_token(&ctx.client, &ctx.config).await?;
    let endpoint = format!("{}{}/", ctx.config.end_points.delete_user_endpoint, id);
    let response = ctx
        .client
        .send(
            ApiRequest::delete(endpoint)
                .header("Content-Type", "application/json")
                .bearer(token),
        )
        .await?;
    info!("Deleted test user with id {}", id);
    Ok(response)
}

/// Create a product with admin authority. The admin token travels back
/// in the fixture so the test body can reuse its headers.
pub async fn create_product(ctx: &SuiteContext) -> ApiResult<TestProduct> {
    let token = admin_token(&ctx.client, &ctx.config).await?;
    let payload = fixture_product_payload();

    let response = ctx
        .client
        .send(
            ApiRequest::post(format!("{}/create/", ctx.config.end_points.products_endpoint))
                .header("Content-Type", "application/json")
                .bearer(&token)
                .json(payload.clone()),
        )
        .await?;
    assert_eq!(
        response.status().as_u16(),
        200,
        "product fixture setup failed with status: {}",
        response.status()
    );

    let id = response
        .json()?
        .get("_id")
        .and_then(Value::as_i64)
        .ok_or_else(|| ApiError::Fixture("create response missing integer _id".to_string()))?;

    Ok(TestProduct {
        id,
        payload,
        token,
        create_response: response,
    })
}

/// Delete a product through the API with fresh admin authority
pub async fn delete_product(ctx: &SuiteContext, id: i64) -> ApiResult<ApiResponse> {
    let token = admin_token(&ctx.client, &ctx.config).await?;
    let endpoint = format!("{}/delete/{}/", ctx.config.end_points.products_endpoint, id);
    let response = ctx
        .client
        .send(
            ApiRequest::delete(endpoint)
                .header("Content-Type", "application/json")
                .bearer(token),
        )
        .await?;
    info!("Deleted test product with id {}", id);
    Ok(response)
}

/// Run a test body against a throwaway user, deleting the user on every
/// exit path.
pub async fn with_user<F, Fut>(ctx: &SuiteContext, body: F) -> ApiResult<()>
where
    F: FnOnce(TestUser) -> Fut,
    Fut: Future<Output = ()>,
{
    let user = create_user(ctx).await?;
    let id = user.id;

    let outcome = AssertUnwindSafe(body(user)).catch_unwind().await;

    if let Err(err) = delete_user(ctx, id).await {
        error!("user fixture teardown failed for id {}: {}", id, err);
    }
    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }
    Ok(())
}

/// Run a test body against a throwaway product, deleting the product on
/// every exit path.
pub async fn with_product<F, Fut>(ctx: &SuiteContext, body: F) -> ApiResult<()>
where
    F: FnOnce(TestProduct) -> Fut,
    Fut: Future<Output = ()>,
{
    let product = create_product(ctx).await?;
    let id = product.id;

    let outcome = AssertUnwindSafe(body(product)).catch_unwind().await;

    if let Err(err) = delete_product(ctx, id).await {
        error!("product fixture teardown failed for id {}: {}", id, err);
    }
    if let Err(panic) = outcome {
        std::panic::resume_unwind(panic);
    }
    Ok(())
}
