pub mod add_missing_vehicles;
pub mod clone_vehicles;
pub mod remove_missing_vehicle_requirements;
pub mod strip_break_locations;
