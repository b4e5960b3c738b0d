//! Domain block handlers
//!
//! Admin endpoints for managing the blocklist, a lookup endpoint for
//! checking a domain or URI, and the public (obfuscated) blocklist.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::entities::{DomainBlock, DomainBlockId, DomainBlockUpdate, NewDomainBlock};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating a domain block
#[derive(Debug, Deserialize)]
pub struct CreateDomainBlockRequest {
    /// Domain to block, Unicode or punycode
    pub domain: String,
    /// Obfuscate the domain when the blocklist is shown publicly
    #[serde(default)]
    pub obfuscate: bool,
    #[serde(default)]
    pub public_comment: Option<String>,
    /// Only shown to other admins
    #[serde(default)]
    pub private_comment: Option<String>,
}

impl From<CreateDomainBlockRequest> for NewDomainBlock {
    fn from(request: CreateDomainBlockRequest) -> Self {
        NewDomainBlock {
            domain: request.domain,
            obfuscate: request.obfuscate,
            public_comment: request.public_comment,
            private_comment: request.private_comment,
        }
    }
}

/// Request body for a partial domain block update
#[derive(Debug, Default, Deserialize)]
pub struct UpdateDomainBlockRequest {
    pub domain: Option<String>,
    pub obfuscate: Option<bool>,
    pub public_comment: Option<String>,
    pub private_comment: Option<String>,
}

impl UpdateDomainBlockRequest {
    /// Reject a patch that sets nothing
    fn into_update(self) -> Result<DomainBlockUpdate, AppError> {
        let update = DomainBlockUpdate {
            domain: self.domain,
            obfuscate: self.obfuscate,
            public_comment: self.public_comment,
            private_comment: self.private_comment,
        };
        if update.is_empty() {
            return Err(AppError::BadRequest("empty form submitted".to_string()));
        }
        Ok(update)
    }
}

/// Domain block as returned to admins
#[derive(Debug, Serialize)]
pub struct DomainBlockResponse {
    pub id: String,
    pub domain: String,
    pub obfuscate: bool,
    pub public_comment: Option<String>,
    pub private_comment: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<DomainBlock> for DomainBlockResponse {
    fn from(block: DomainBlock) -> Self {
        Self {
            id: block.id.to_string(),
            domain: block.domain,
            obfuscate: block.obfuscate,
            public_comment: block.public_comment,
            private_comment: block.private_comment,
            created_at: block.created_at.to_rfc3339(),
            updated_at: block.updated_at.to_rfc3339(),
        }
    }
}

/// Domain block as shown to anyone
#[derive(Debug, Serialize)]
pub struct PublicDomainBlock {
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl From<DomainBlock> for PublicDomainBlock {
    fn from(block: DomainBlock) -> Self {
        Self {
            domain: block.public_domain(),
            comment: block.public_comment,
        }
    }
}

/// Query params for the blocklist check; exactly one must be given
#[derive(Debug, Deserialize)]
pub struct CheckParams {
    pub domain: Option<String>,
    pub uri: Option<String>,
}

/// Request body for checking several domains and URIs at once
#[derive(Debug, Default, Deserialize)]
pub struct BatchCheckRequest {
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub uris: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchCheckResponse {
    /// True if any domain or URI host is blocked
    pub blocked: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    /// The domain or URI that was checked, as given
    pub target: String,
    pub blocked: bool,
}

fn parse_block_id(id: &str) -> Result<DomainBlockId, AppError> {
    uuid::Uuid::parse_str(id)
        .map(DomainBlockId::from)
        .map_err(|_| AppError::BadRequest(format!("Invalid domain block ID: {}", id)))
}

/// GET /api/v1/admin/domain_blocks
pub async fn list_domain_blocks(
    State(state): State<AppState>,
) -> Result<Json<Vec<DomainBlockResponse>>, AppError> {
    let blocks = state.domain_block_service.list_domain_blocks().await?;
    Ok(Json(blocks.into_iter().map(DomainBlockResponse::from).collect()))
}

/// POST /api/v1/admin/domain_blocks
pub async fn create_domain_block(
    State(state): State<AppState>,
    Json(request): Json<CreateDomainBlockRequest>,
) -> Result<Json<DomainBlockResponse>, AppError> {
    let block = state
        .domain_block_service
        .create_domain_block(request.into())
        .await?;
    Ok(Json(block.into()))
}

/// GET /api/v1/admin/domain_blocks/:id
pub async fn get_domain_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DomainBlockResponse>, AppError> {
    let id = parse_block_id(&id)?;
    let block = state.domain_block_service.get_domain_block_by_id(&id).await?;
    Ok(Json(block.into()))
}

/// GET /api/v1/admin/domain_blocks/domain/:domain
///
/// Looks a block up by domain, accepting Unicode or punycode.
pub async fn get_domain_block_by_domain(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> Result<Json<DomainBlockResponse>, AppError> {
    let block = state.domain_block_service.get_domain_block(&domain).await?;
    Ok(Json(block.into()))
}

/// PATCH /api/v1/admin/domain_blocks/:id
///
/// Only the fields present in the body are changed.
pub async fn update_domain_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateDomainBlockRequest>,
) -> Result<Json<DomainBlockResponse>, AppError> {
    let id = parse_block_id(&id)?;
    let update = request.into_update()?;
    let block = state
        .domain_block_service
        .update_domain_block(&id, update)
        .await?;
    Ok(Json(block.into()))
}

/// DELETE /api/v1/admin/domain_blocks/:id
///
/// Returns the block that was removed.
pub async fn delete_domain_block(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DomainBlockResponse>, AppError> {
    let id = parse_block_id(&id)?;
    let block = state
        .domain_block_service
        .delete_domain_block_by_id(&id)
        .await?;
    Ok(Json(block.into()))
}

/// GET /api/v1/domain_blocks/check?domain=... or ?uri=...
pub async fn check_domain_block(
    State(state): State<AppState>,
    Query(params): Query<CheckParams>,
) -> Result<Json<CheckResponse>, AppError> {
    let service = &state.domain_block_service;
    let (target, blocked) = match (params.domain, params.uri) {
        (Some(domain), None) => {
            let blocked = service.is_domain_blocked(&domain).await?;
            (domain, blocked)
        }
        (None, Some(uri)) => {
            let parsed = Url::parse(&uri)
                .map_err(|e| AppError::BadRequest(format!("Invalid URI {}: {}", uri, e)))?;
            let blocked = service.is_uri_blocked(&parsed).await?;
            (uri, blocked)
        }
        _ => {
            return Err(AppError::BadRequest(
                "Exactly one of 'domain' or 'uri' is required".to_string(),
            ))
        }
    };

    Ok(Json(CheckResponse { target, blocked }))
}

/// POST /api/v1/domain_blocks/check
///
/// Domains are checked before URIs; the first block or error ends the check.
pub async fn check_domain_blocks(
    State(state): State<AppState>,
    Json(request): Json<BatchCheckRequest>,
) -> Result<Json<BatchCheckResponse>, AppError> {
    let uris = request
        .uris
        .iter()
        .map(|uri| {
            Url::parse(uri).map_err(|e| AppError::BadRequest(format!("Invalid URI {}: {}", uri, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let service = &state.domain_block_service;
    let blocked = service.are_domains_blocked(&request.domains).await?
        || service.are_uris_blocked(&uris).await?;

    Ok(Json(BatchCheckResponse { blocked }))
}

/// GET /api/v1/instance/domain_blocks
///
/// Public blocklist: obfuscated domains and public comments only.
pub async fn list_public_domain_blocks(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicDomainBlock>>, AppError> {
    let blocks = state.domain_block_service.list_domain_blocks().await?;
    Ok(Json(blocks.into_iter().map(PublicDomainBlock::from).collect()))
}
