use crate::commands::print_json;
use crate::error::not_found;
use anyhow::Result;
use carlead_config::AppConfig;
use carlead_core::domain::Status;
use carlead_core::dto::LabelDto;
use clap::Args;

#[derive(Debug, Args)]
pub struct TaxonomyArgs {
    /// List the models of this brand
    #[arg(long)]
    pub brand: Option<String>,
    /// List the trims of this model
    #[arg(long, requires = "brand")]
    pub model: Option<String>,
}

pub fn list_statuses(json: bool) -> Result<()> {
    let statuses: Vec<LabelDto> = Status::ALL
        .into_iter()
        .map(|status| LabelDto {
            value: status.value().to_string(),
            label: status.label().to_string(),
        })
        .collect();

    if json {
        return print_json(&statuses);
    }
    for status in statuses {
        println!("{:<10} {}", status.value, status.label);
    }
    Ok(())
}

pub fn show_taxonomy(config: &AppConfig, json: bool, args: TaxonomyArgs) -> Result<()> {
    let taxonomy = &config.taxonomy;
    let names: Vec<&str> = match (args.brand.as_deref(), args.model.as_deref()) {
        (None, _) => taxonomy.brands().collect(),
        (Some(brand), None) => {
            let brand = brand.trim();
            if taxonomy.brands().all(|known| known != brand) {
                return Err(not_found(format!("brand {brand}")));
            }
            taxonomy.models(brand)
        }
        (Some(brand), Some(model)) => {
            let (brand, model) = (brand.trim(), model.trim());
            if !taxonomy.models(brand).contains(&model) {
                return Err(not_found(format!("model {brand} {model}")));
            }
            taxonomy.trims(brand, model)
        }
    };

    if json {
        return print_json(&names);
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}
