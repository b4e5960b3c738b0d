//! PostgreSQL adapter for DomainBlockRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Schema, Set, SqlErr,
};
use uuid::Uuid;

use crate::domain::entities::{DomainBlock, DomainBlockId, NewDomainBlock};
use crate::domain::ports::DomainBlockRepository;
use crate::entity::domain_blocks;
use crate::error::DomainError;

/// PostgreSQL implementation of DomainBlockRepository
pub struct PostgresDomainBlockRepository {
    db: DatabaseConnection,
}

impl PostgresDomainBlockRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create the `domain_blocks` table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DomainError> {
        let backend = self.db.get_database_backend();
        let schema = Schema::new(backend);
        let mut table = schema.create_table_from_entity(domain_blocks::Entity);
        table.if_not_exists();

        self.db
            .execute(backend.build(&table))
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl DomainBlockRepository for PostgresDomainBlockRepository {
    async fn fetch_all_blocked_domains(&self) -> Result<Vec<String>, DomainError> {
        domain_blocks::Entity::find()
            .select_only()
            .column(domain_blocks::Column::Domain)
            .into_tuple::<String>()
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))
    }

    async fn insert(&self, block: &NewDomainBlock) -> Result<DomainBlock, DomainError> {
        let now = Utc::now().fixed_offset();

        let model = domain_blocks::ActiveModel {
            id: Set(Uuid::new_v4()),
            domain: Set(block.domain.clone()),
            obfuscate: Set(block.obfuscate),
            public_comment: Set(block.public_comment.clone()),
            private_comment: Set(block.private_comment.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| map_write_error(e, &block.domain))?;

        Ok(result.into())
    }

    async fn update(&self, block: &DomainBlock) -> Result<DomainBlock, DomainError> {
        let result = domain_blocks::ActiveModel {
            id: Set(block.id.0),
            domain: Set(block.domain.clone()),
            obfuscate: Set(block.obfuscate),
            public_comment: Set(block.public_comment.clone()),
            private_comment: Set(block.private_comment.clone()),
            updated_at: Set(Utc::now().fixed_offset()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|e| match e {
            DbErr::RecordNotUpdated => {
                DomainError::NotFound(format!("Domain block {} not found", block.id))
            }
            e => map_write_error(e, &block.domain),
        })?;

        Ok(result.into())
    }

    async fn delete_by_domain(&self, domain: &str) -> Result<u64, DomainError> {
        let result = domain_blocks::Entity::delete_many()
            .filter(domain_blocks::Column::Domain.eq(domain))
            .exec(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.rows_affected)
    }

    async fn find_by_domain(&self, domain: &str) -> Result<Option<DomainBlock>, DomainError> {
        let result = domain_blocks::Entity::find()
            .filter(domain_blocks::Column::Domain.eq(domain))
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn find_by_id(&self, id: &DomainBlockId) -> Result<Option<DomainBlock>, DomainError> {
        let result = domain_blocks::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(result.map(|m| m.into()))
    }

    async fn list_all(&self) -> Result<Vec<DomainBlock>, DomainError> {
        let results = domain_blocks::Entity::find()
            .order_by_asc(domain_blocks::Column::Domain)
            .all(&self.db)
            .await
            .map_err(|e| DomainError::Database(e.to_string()))?;

        Ok(results.into_iter().map(|m| m.into()).collect())
    }
}

/// Unique violations on `domain` become conflicts, everything else is a store failure
fn map_write_error(e: DbErr, domain: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::Conflict(format!("Domain '{}' is already blocked", domain))
        }
        _ => DomainError::Database(e.to_string()),
    }
}

/// Convert SeaORM model to domain entity
impl From<domain_blocks::Model> for DomainBlock {
    fn from(model: domain_blocks::Model) -> Self {
        DomainBlock {
            id: DomainBlockId(model.id),
            domain: model.domain,
            obfuscate: model.obfuscate,
            public_comment: model.public_comment,
            private_comment: model.private_comment,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}
