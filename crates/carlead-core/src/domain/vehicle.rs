//! Brand → model → trim reference data and cascading selection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleModel {
    pub name: String,
    pub trims: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleBrand {
    pub name: String,
    pub models: Vec<VehicleModel>,
}

/// Ordered, read-only catalog of selectable vehicles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleTaxonomy {
    brands: Vec<VehicleBrand>,
}

const BUILTIN: &[(&str, &[(&str, &[&str])])] = &[
    (
        "BMW",
        &[
            ("1-serie", &["Standard", "M Sport"]),
            ("2-serie", &["Gran Coupé", "Active Tourer", "M Sport"]),
            ("3-serie", &["Sedan", "Touring", "M Sport", "M3"]),
            ("4-serie", &["Coupé", "Gran Coupé", "Cabriolet", "M4"]),
            ("5-serie", &["Sedan", "Touring", "M Sport", "M5"]),
            ("X1", &["xLine", "M Sport"]),
            ("X3", &["xLine", "M Sport", "M Competition"]),
        ],
    ),
    (
        "Volvo",
        &[
            ("EX30", &["Core", "Plus", "Ultra"]),
            ("XC40", &["Core", "Plus", "Ultimate", "R-Design"]),
            ("XC60", &["Core", "Plus", "Ultimate", "R-Design"]),
            ("V60", &["Core", "Plus", "Cross Country"]),
        ],
    ),
    (
        "Audi",
        &[
            ("A3", &["Sportback", "Sedan", "S line"]),
            ("A4", &["Sedan", "Avant", "S line"]),
            ("Q3", &["S line"]),
            ("Q5", &["S line", "Sportback"]),
        ],
    ),
    (
        "Mercedes-Benz",
        &[
            ("A-Class", &["AMG Line", "Progressive"]),
            ("C-Class", &["Sedan", "Kombi", "AMG Line"]),
            ("GLC", &["SUV", "Coupé", "AMG Line"]),
        ],
    ),
    (
        "Volkswagen",
        &[
            ("Golf", &["GTI", "R-Line", "R"]),
            ("Passat", &["Variant", "R-Line"]),
            ("Tiguan", &["R-Line"]),
            ("ID.4", &["Pro", "GTX"]),
        ],
    ),
    (
        "Toyota",
        &[
            ("Yaris", &["Cross"]),
            ("Corolla", &["Touring Sports"]),
            ("RAV4", &[]),
        ],
    ),
    (
        "Kia",
        &[("Ceed", &["SW", "Proceed", "XCeed"]), ("Sportage", &[]), ("EV6", &[])],
    ),
];

impl Default for VehicleTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VehicleTaxonomy {
    pub fn empty() -> Self {
        Self { brands: Vec::new() }
    }

    pub fn builtin() -> Self {
        let mut taxonomy = Self::empty();
        for (brand, models) in BUILTIN {
            for (model, trims) in *models {
                taxonomy.add_model(brand, model, trims.iter().copied());
            }
        }
        taxonomy
    }

    /// Adds a model (creating the brand if needed). Existing entries keep
    /// their position; unseen trims are appended.
    pub fn add_model<'a>(
        &mut self,
        brand: &str,
        model: &str,
        trims: impl IntoIterator<Item = &'a str>,
    ) {
        let brand_idx = match self.brands.iter().position(|b| b.name == brand) {
            Some(idx) => idx,
            None => {
                self.brands.push(VehicleBrand {
                    name: brand.to_string(),
                    models: Vec::new(),
                });
                self.brands.len() - 1
            }
        };
        let models = &mut self.brands[brand_idx].models;
        let model_idx = match models.iter().position(|m| m.name == model) {
            Some(idx) => idx,
            None => {
                models.push(VehicleModel {
                    name: model.to_string(),
                    trims: Vec::new(),
                });
                models.len() - 1
            }
        };
        let existing = &mut models[model_idx].trims;
        for trim in trims {
            if !existing.iter().any(|t| t == trim) {
                existing.push(trim.to_string());
            }
        }
    }

    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.brands.iter().map(|brand| brand.name.as_str())
    }

    pub fn models(&self, brand: &str) -> Vec<&str> {
        self.brand(brand)
            .map(|b| b.models.iter().map(|m| m.name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn trims(&self, brand: &str, model: &str) -> Vec<&str> {
        self.model(brand, model)
            .map(|m| m.trims.iter().map(|t| t.as_str()).collect())
            .unwrap_or_default()
    }

    /// Whether every set level of `selection` exists in the catalog.
    pub fn contains(&self, selection: &VehicleSelection) -> bool {
        if selection.brand.is_empty() {
            return true;
        }
        if self.brand(&selection.brand).is_none() {
            return false;
        }
        if selection.model.is_empty() {
            return true;
        }
        let Some(model) = self.model(&selection.brand, &selection.model) else {
            return false;
        };
        selection.trim.is_empty() || model.trims.iter().any(|t| *t == selection.trim)
    }

    fn brand(&self, brand: &str) -> Option<&VehicleBrand> {
        self.brands.iter().find(|b| b.name == brand)
    }

    fn model(&self, brand: &str, model: &str) -> Option<&VehicleModel> {
        self.brand(brand)?.models.iter().find(|m| m.name == model)
    }
}

/// A brand → model → trim choice. Setting a level clears the levels below
/// it, so a trim never outlives its model and a model never outlives its
/// brand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VehicleSelection {
    brand: String,
    model: String,
    trim: String,
}

impl VehicleSelection {
    /// Builds a selection from possibly inconsistent parts, dropping any
    /// level whose parent is empty.
    pub fn from_parts(brand: &str, model: &str, trim: &str) -> Self {
        let mut selection = Self::default();
        selection.set_brand(brand);
        selection.set_model(model);
        selection.set_trim(trim);
        selection
    }

    pub fn set_brand(&mut self, brand: &str) {
        self.brand = brand.trim().to_string();
        self.model.clear();
        self.trim.clear();
    }

    pub fn set_model(&mut self, model: &str) {
        self.trim.clear();
        self.model = if self.brand.is_empty() {
            String::new()
        } else {
            model.trim().to_string()
        };
    }

    pub fn set_trim(&mut self, trim: &str) {
        self.trim = if self.model.is_empty() {
            String::new()
        } else {
            trim.trim().to_string()
        };
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn trim(&self) -> &str {
        &self.trim
    }

    pub fn is_empty(&self) -> bool {
        self.brand.is_empty()
    }
}
