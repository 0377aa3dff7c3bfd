mod climate_api;
mod home;
