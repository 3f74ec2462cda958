//! Supported cities
//!
//! Major world cities (population over one million, plus capitals). The backend
//! serves the same catalogue from `GET /api/cities`; this copy backs the pickers
//! when that call is unavailable.

pub const WORLD_CITIES: &[&str] = &[
    "Addis Ababa", "Adelaide", "Ahmedabad", "Alexandria", "Algiers", "Almaty",
    "Amsterdam", "Ankara", "Athens", "Atlanta", "Auckland", "Baghdad", "Baku",
    "Bangkok", "Barcelona", "Beijing", "Belgrade", "Berlin", "Birmingham",
    "Bogotá", "Boston", "Brisbane", "Brussels", "Bucharest", "Budapest",
    "Buenos Aires", "Cairo", "Calgary", "Cape Town", "Caracas", "Casablanca",
    "Chennai", "Chicago", "Cologne", "Copenhagen", "Dallas", "Damascus", "Delhi",
    "Detroit", "Dhaka", "Dubai", "Dublin", "Düsseldorf", "Edinburgh", "Frankfurt",
    "Geneva", "Glasgow", "Guadalajara", "Hamburg", "Helsinki", "Ho Chi Minh City",
    "Hong Kong", "Houston", "Istanbul", "Jakarta", "Johannesburg", "Karachi",
    "Kiev", "Kuala Lumpur", "Lagos", "Lahore", "Lima", "Lisbon", "London",
    "Los Angeles", "Lyon", "Madrid", "Manchester", "Manila", "Melbourne",
    "Mexico City", "Miami", "Milan", "Minneapolis", "Montreal", "Moscow",
    "Mumbai", "Munich", "Nairobi", "New York", "Oslo", "Paris", "Perth",
    "Philadelphia", "Phoenix", "Prague", "Riyadh", "Rome", "San Francisco",
    "Santiago", "São Paulo", "Seoul", "Shanghai", "Singapore", "Stockholm",
    "Sydney", "Taipei", "Tehran", "Tel Aviv", "Tokyo", "Toronto", "Vancouver",
    "Vienna", "Warsaw", "Washington", "Zurich",
];

/// Whether `city` is in the catalogue (exact match)
pub fn is_known_city(city: &str) -> bool {
    WORLD_CITIES.contains(&city)
}

/// Cities a user living in `home_city` may target. Their own city is never offered.
pub fn target_cities<'a>(catalogue: &'a [&'a str], home_city: &str) -> Vec<&'a str> {
    catalogue
        .iter()
        .copied()
        .filter(|city| *city != home_city)
        .collect()
}
