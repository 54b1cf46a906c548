//! Vendors service

use validator::Validate;

use crate::{
    error::AppResult,
    models::vendor::{CreateVendor, UpdateVendor, Vendor},
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct VendorsService {
    repository: Repository,
}

impl VendorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Vendor>> {
        self.repository.vendors.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Vendor> {
        self.repository.vendors.get_by_id(id).await
    }

    pub async fn create(&self, mut data: CreateVendor) -> AppResult<Vendor> {
        data.validate()?;
        data.name = validation::required_name(Some(&data.name), "Vendor")?;
        self.repository.vendors.create(&data).await
    }

    pub async fn update(&self, id: i32, mut data: UpdateVendor) -> AppResult<Vendor> {
        data.validate()?;
        if let Some(ref name) = data.name {
            data.name = Some(validation::required_name(Some(name), "Vendor")?);
        }
        self.repository.vendors.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.vendors.delete(id).await
    }
}
