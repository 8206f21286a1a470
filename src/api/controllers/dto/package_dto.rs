use crate::data::models::package::{NewPackage, Package, UpdatePackage};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct PackageRequest {
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    pub active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PackageDTO {
    pub id: i32,
    pub description: String,
    pub active: bool,
}

impl From<Package> for PackageDTO {
    fn from(package: Package) -> Self {
        Self {
            id: package.id,
            description: package.description,
            active: package.active,
        }
    }
}

impl From<PackageRequest> for NewPackage {
    fn from(request: PackageRequest) -> Self {
        Self {
            description: request.description,
            active: request.active,
        }
    }
}

impl From<PackageRequest> for UpdatePackage {
    fn from(request: PackageRequest) -> Self {
        Self {
            description: request.description,
            active: request.active,
        }
    }
}
