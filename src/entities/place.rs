use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub landmark: String,
    pub area: String,
    pub state: String,
    pub coordinates: Coordinates,
}

impl Place {
    /// Case-insensitive substring match against any part of the address.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();

        if query.is_empty() {
            return true;
        }

        [&self.landmark, &self.area, &self.state]
            .iter()
            .any(|part| part.to_lowercase().contains(&query))
    }
}
