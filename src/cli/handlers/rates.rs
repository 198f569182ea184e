use crate::cli::output::OutputFormatter;
use crate::config::UiSettings;
use crate::core::VehicleTypeCatalog;
use crate::error::Result;

/// One rate-card line, e.g. `1. Car    - Rs.30/hour`
pub fn rate_line(id: u8, name: &str, rate: &rust_decimal::Decimal, currency: &str) -> String {
    format!("{id}. {name:<6} - {currency}{rate}/hour")
}

/// Handle the `rates` command
pub fn handle_rates_command(
    catalog: &VehicleTypeCatalog,
    ui: &UiSettings,
    formatter: &OutputFormatter,
) -> Result<()> {
    if formatter.is_json() {
        return formatter.print_json(&serde_json::json!({
            "currency": ui.currency_symbol,
            "vehicle_types": catalog,
        }));
    }

    formatter.info("Vehicle Types and Pricing:");
    for vehicle_type in catalog.iter() {
        formatter.info(&rate_line(
            vehicle_type.id,
            &vehicle_type.name,
            &vehicle_type.rate_per_hour,
            &ui.currency_symbol,
        ));
    }
    Ok(())
}
