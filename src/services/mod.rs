/// Business logic services layer
pub mod launches;
pub mod movies;
pub mod nearby;
pub mod visibility;
pub mod weather;

pub use launches::LaunchService;
pub use movies::{DiscoverParams, MovieService};
pub use nearby::{NearbyParams, NearbyService};
pub use weather::WeatherService;
