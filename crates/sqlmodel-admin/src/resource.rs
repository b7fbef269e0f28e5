//! Resource adapter: the host's CRUD/query surface over a native model.

// Allow `impl Future` return types in trait methods - intentional for async trait compat
#![allow(clippy::manual_async_fn)]

use std::any::Any;
use std::future::Future;

use asupersync::{Cx, Outcome};
use sqlmodel_admin_core::{
    Error, Filter, FindOptions, NotFoundError, Params, Record, Resource, Result, SortDirection,
    UnknownFieldError, Value,
};
use sqlmodel_admin_schema::{
    FindQuery, ModelDef, ModelStore, Order, Row, StoreError, is_model_store,
};

use crate::config::ResourceConfig;
use crate::filter::FilterTranslator;
use crate::property::PropertyAdapter;
use crate::validation::ValidationErrorMapper;

/// Exposes one [`ModelStore`] as a host [`Resource`].
///
/// Holds only the store handle, its configuration and the primary key name
/// resolved at construction; no state is mutated across calls.
#[derive(Debug, Clone)]
pub struct ResourceAdapter<S> {
    store: S,
    config: ResourceConfig,
    primary_key: String,
}

impl<S: ModelStore + 'static> ResourceAdapter<S> {
    /// Whether `candidate` is a store handle this adapter type can wrap.
    ///
    /// Accepts `S` and `Arc<S>`.
    pub fn is_adapter_for(candidate: &dyn Any) -> bool {
        is_model_store::<S>(candidate)
    }
}

impl<S: ModelStore> ResourceAdapter<S> {
    /// Wrap a store with the default configuration.
    pub fn new(store: S) -> Result<Self> {
        Self::with_config(store, ResourceConfig::default())
    }

    /// Wrap a store with a custom configuration.
    ///
    /// Fails if the model declares no primary key column.
    pub fn with_config(store: S, config: ResourceConfig) -> Result<Self> {
        let model = store.model();
        let Some(pk) = model.primary_key() else {
            return Err(Error::MissingPrimaryKey {
                resource: model.table_name.clone(),
            });
        };
        let primary_key = pk.name.clone();
        tracing::debug!(
            resource = %model.table_name,
            primary_key = %primary_key,
            "Registered resource"
        );
        Ok(Self {
            store,
            config,
            primary_key,
        })
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Current configuration.
    pub fn config(&self) -> &ResourceConfig {
        &self.config
    }

    /// Name of the primary key column.
    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    fn model(&self) -> &ModelDef {
        self.store.model()
    }

    fn record(&self, row: Row) -> Record {
        Record::new(row.into_params(), self.id(), self.primary_key.as_str())
    }

    fn not_found(&self, id: &Value) -> Error {
        Error::NotFound(NotFoundError {
            resource: self.model().table_name.clone(),
            id: id.clone(),
        })
    }

    /// Translate a failed write: validation failures are reshaped, anything
    /// else is forwarded as the native error.
    fn write_error(&self, err: StoreError) -> Error {
        match err {
            StoreError::Validation(failure) => {
                let mapped = ValidationErrorMapper::map(&self.model().table_name, &failure);
                tracing::warn!(
                    resource = %self.model().table_name,
                    fields = mapped.errors.len(),
                    "Write rejected by validation"
                );
                Error::Validation(mapped)
            }
            other => Error::store(other),
        }
    }

    fn find_query(&self, filter: Option<&Filter>, options: &FindOptions) -> Result<FindQuery> {
        let model = self.model();
        let direction = SortDirection::parse(&options.sort.direction)?;
        if model.get(&options.sort.sort_by).is_none() {
            return Err(Error::UnknownField(UnknownFieldError {
                resource: model.table_name.clone(),
                field: options.sort.sort_by.clone(),
            }));
        }
        Ok(FindQuery {
            where_clause: FilterTranslator::translate(filter, model)?,
            limit: options.limit.unwrap_or(self.config.default_limit),
            offset: options.offset.unwrap_or(0),
            order: Order::new(options.sort.sort_by.as_str(), direction),
        })
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, cx, filter),
        fields(resource = %self.model().table_name)
    )]
    async fn count_async(&self, cx: &Cx, filter: Option<&Filter>) -> Outcome<u64, Error> {
        let where_clause = match FilterTranslator::translate(filter, self.model()) {
            Ok(w) => w,
            Err(e) => return Outcome::Err(e),
        };

        match self.store.count(cx, &where_clause).await {
            Outcome::Ok(n) => {
                tracing::debug!(rows = n, "Counted rows");
                Outcome::Ok(n)
            }
            Outcome::Err(e) => Outcome::Err(Error::store(e)),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, cx, filter, options),
        fields(resource = %self.model().table_name)
    )]
    async fn find_async(
        &self,
        cx: &Cx,
        filter: Option<&Filter>,
        options: &FindOptions,
    ) -> Outcome<Vec<Record>, Error> {
        let query = match self.find_query(filter, options) {
            Ok(q) => q,
            Err(e) => return Outcome::Err(e),
        };
        tracing::debug!(
            limit = query.limit,
            offset = query.offset,
            sort_by = %query.order.column,
            direction = query.order.direction.as_sql(),
            "Finding rows"
        );

        match self.store.find_all(cx, &query).await {
            Outcome::Ok(rows) => {
                tracing::debug!(rows = rows.len(), "Found rows");
                Outcome::Ok(rows.into_iter().map(|row| self.record(row)).collect())
            }
            Outcome::Err(e) => Outcome::Err(Error::store(e)),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, cx),
        fields(resource = %self.model().table_name)
    )]
    async fn find_one_async(&self, cx: &Cx, id: &Value) -> Outcome<Record, Error> {
        match self.store.find_by_pk(cx, id).await {
            Outcome::Ok(Some(row)) => Outcome::Ok(self.record(row)),
            Outcome::Ok(None) => Outcome::Err(self.not_found(id)),
            Outcome::Err(e) => Outcome::Err(Error::store(e)),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, cx, params),
        fields(resource = %self.model().table_name)
    )]
    async fn create_async(&self, cx: &Cx, params: &Params) -> Outcome<Record, Error> {
        match self.store.create(cx, params).await {
            Outcome::Ok(row) => {
                let record = self.record(row);
                tracing::info!(id = ?record.id(), "Created record");
                Outcome::Ok(record)
            }
            Outcome::Err(e) => Outcome::Err(self.write_error(e)),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, cx, params),
        fields(resource = %self.model().table_name)
    )]
    async fn update_async(&self, cx: &Cx, id: &Value, params: &Params) -> Outcome<Record, Error> {
        match self.store.update(cx, id, params).await {
            Outcome::Ok(affected) => {
                tracing::debug!(rows = affected, "Updated rows");
            }
            Outcome::Err(e) => return Outcome::Err(self.write_error(e)),
            Outcome::Cancelled(r) => return Outcome::Cancelled(r),
            Outcome::Panicked(p) => return Outcome::Panicked(p),
        }

        // Not atomic with the write: a concurrent delete surfaces as NotFound.
        match self.store.find_by_pk(cx, id).await {
            Outcome::Ok(Some(row)) => Outcome::Ok(self.record(row)),
            Outcome::Ok(None) => Outcome::Err(self.not_found(id)),
            Outcome::Err(e) => Outcome::Err(Error::store(e)),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }

    #[tracing::instrument(
        level = "debug",
        skip(self, cx),
        fields(resource = %self.model().table_name)
    )]
    async fn delete_async(&self, cx: &Cx, id: &Value) -> Outcome<u64, Error> {
        match self.store.destroy(cx, id).await {
            Outcome::Ok(n) => {
                tracing::info!(rows = n, "Deleted rows");
                Outcome::Ok(n)
            }
            Outcome::Err(e) => Outcome::Err(Error::store(e)),
            Outcome::Cancelled(r) => Outcome::Cancelled(r),
            Outcome::Panicked(p) => Outcome::Panicked(p),
        }
    }
}

impl<S: ModelStore> Resource for ResourceAdapter<S> {
    type Property = PropertyAdapter;

    fn id(&self) -> String {
        self.model().table_name.to_lowercase()
    }

    fn name(&self) -> &str {
        &self.model().table_name
    }

    fn database_name(&self) -> &str {
        &self.model().database_name
    }

    fn database_type(&self) -> &str {
        &self.model().dialect
    }

    fn properties(&self) -> Vec<PropertyAdapter> {
        self.model()
            .columns
            .iter()
            .cloned()
            .map(PropertyAdapter::new)
            .collect()
    }

    fn property(&self, field: &str) -> Result<PropertyAdapter> {
        let model = self.model();
        model
            .get(field)
            .cloned()
            .map(PropertyAdapter::new)
            .ok_or_else(|| {
                Error::UnknownField(UnknownFieldError {
                    resource: model.table_name.clone(),
                    field: field.to_string(),
                })
            })
    }

    fn count(
        &self,
        cx: &Cx,
        filter: Option<&Filter>,
    ) -> impl Future<Output = Outcome<u64, Error>> + Send {
        self.count_async(cx, filter)
    }

    fn find(
        &self,
        cx: &Cx,
        filter: Option<&Filter>,
        options: &FindOptions,
    ) -> impl Future<Output = Outcome<Vec<Record>, Error>> + Send {
        self.find_async(cx, filter, options)
    }

    fn find_one(
        &self,
        cx: &Cx,
        id: &Value,
    ) -> impl Future<Output = Outcome<Record, Error>> + Send {
        self.find_one_async(cx, id)
    }

    fn create(
        &self,
        cx: &Cx,
        params: &Params,
    ) -> impl Future<Output = Outcome<Record, Error>> + Send {
        self.create_async(cx, params)
    }

    fn update(
        &self,
        cx: &Cx,
        id: &Value,
        params: &Params,
    ) -> impl Future<Output = Outcome<Record, Error>> + Send {
        self.update_async(cx, id, params)
    }

    fn delete(&self, cx: &Cx, id: &Value) -> impl Future<Output = Outcome<u64, Error>> + Send {
        self.delete_async(cx, id)
    }
}
