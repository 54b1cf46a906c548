//! Stations service

use validator::Validate;

use crate::{
    error::AppResult,
    models::station::{CreateStation, Station, UpdateStation},
    repository::Repository,
    validation,
};

#[derive(Clone)]
pub struct StationsService {
    repository: Repository,
}

impl StationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Station>> {
        self.repository.stations.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Station> {
        self.repository.stations.get_by_id(id).await
    }

    pub async fn create(&self, mut data: CreateStation) -> AppResult<Station> {
        data.validate()?;
        data.name = validation::required_name(Some(&data.name), "Station")?;
        let station = self.repository.stations.create(&data).await?;
        tracing::info!(station_id = station.id, "Created station '{}'", station.name);
        Ok(station)
    }

    pub async fn update(&self, id: i32, mut data: UpdateStation) -> AppResult<Station> {
        data.validate()?;
        if let Some(ref name) = data.name {
            data.name = Some(validation::required_name(Some(name), "Station")?);
        }
        self.repository.stations.update(id, &data).await
    }

    /// Delete a station and everything assigned to it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let removed = self.repository.stations.delete(id).await?;
        tracing::info!(station_id = id, equipment_removed = removed, "Deleted station");
        Ok(())
    }
}
