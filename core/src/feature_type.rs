//! Place feature types.
//!
//! The documented search filters are associated constants; responses may
//! carry types outside that list (`point_of_interest`, `locality`, ...), so
//! the type itself stays open and keeps whatever string the server sent.

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A feature type describing a place, e.g. `cafe`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureType(Cow<'static, str>);

macro_rules! feature_types {
    ($($name:ident => $value:literal,)*) => {
        impl FeatureType {
            $(pub const $name: FeatureType = FeatureType(Cow::Borrowed($value));)*

            /// Every type accepted by the `types` search filter.
            pub const SEARCHABLE: &'static [FeatureType] = &[$(FeatureType::$name,)*];
        }
    };
}

feature_types! {
    ACCOUNTING => "accounting",
    AIRPORT => "airport",
    AMUSEMENT_PARK => "amusement_park",
    AQUARIUM => "aquarium",
    ART_GALLERY => "art_gallery",
    ATM => "atm",
    BAKERY => "bakery",
    BANK => "bank",
    BAR => "bar",
    BEAUTY_SALON => "beauty_salon",
    BICYCLE_STORE => "bicycle_store",
    BOOK_STORE => "book_store",
    BOWLING_ALLEY => "bowling_alley",
    BUS_STATION => "bus_station",
    CAFE => "cafe",
    CAMPGROUND => "campground",
    CAR_DEALER => "car_dealer",
    CAR_RENTAL => "car_rental",
    CAR_REPAIR => "car_repair",
    CAR_WASH => "car_wash",
    CASINO => "casino",
    CEMETERY => "cemetery",
    CHURCH => "church",
    CITY_HALL => "city_hall",
    CLOTHING_STORE => "clothing_store",
    CONVENIENCE_STORE => "convenience_store",
    COURTHOUSE => "courthouse",
    DENTIST => "dentist",
    DEPARTMENT_STORE => "department_store",
    DOCTOR => "doctor",
    ELECTRICIAN => "electrician",
    ELECTRONICS_STORE => "electronics_store",
    EMBASSY => "embassy",
    ESTABLISHMENT => "establishment",
    FINANCE => "finance",
    FIRE_STATION => "fire_station",
    FLORIST => "florist",
    FOOD => "food",
    FUNERAL_HOME => "funeral_home",
    FURNITURE_STORE => "furniture_store",
    GAS_STATION => "gas_station",
    GENERAL_CONTRACTOR => "general_contractor",
    GROCERY_OR_SUPERMARKET => "grocery_or_supermarket",
    GYM => "gym",
    HAIR_CARE => "hair_care",
    HARDWARE_STORE => "hardware_store",
    HEALTH => "health",
    HINDU_TEMPLE => "hindu_temple",
    HOME_GOODS_STORE => "home_goods_store",
    HOSPITAL => "hospital",
    INSURANCE_AGENCY => "insurance_agency",
    JEWELRY_STORE => "jewelry_store",
    LAUNDRY => "laundry",
    LAWYER => "lawyer",
    LIBRARY => "library",
    LIQUOR_STORE => "liquor_store",
    LOCAL_GOVERNMENT_OFFICE => "local_government_office",
    LOCKSMITH => "locksmith",
    LODGING => "lodging",
    MEAL_DELIVERY => "meal_delivery",
    MEAL_TAKEAWAY => "meal_takeaway",
    MOSQUE => "mosque",
    MOVIE_RENTAL => "movie_rental",
    MOVIE_THEATER => "movie_theater",
    MOVING_COMPANY => "moving_company",
    MUSEUM => "museum",
    NIGHT_CLUB => "night_club",
    PAINTER => "painter",
    PARK => "park",
    PARKING => "parking",
    PET_STORE => "pet_store",
    PHARMACY => "pharmacy",
    PHYSIOTHERAPIST => "physiotherapist",
    PLACE_OF_WORSHIP => "place_of_worship",
    PLUMBER => "plumber",
    POLICE => "police",
    POST_OFFICE => "post_office",
    REAL_ESTATE_AGENCY => "real_estate_agency",
    RESTAURANT => "restaurant",
    ROOFING_CONTRACTOR => "roofing_contractor",
    RV_PARK => "rv_park",
    SCHOOL => "school",
    SHOE_STORE => "shoe_store",
    SHOPPING_MALL => "shopping_mall",
    SPA => "spa",
    STADIUM => "stadium",
    STORAGE => "storage",
    STORE => "store",
    SUBWAY_STATION => "subway_station",
    SYNAGOGUE => "synagogue",
    TAXI_STAND => "taxi_stand",
    TRAIN_STATION => "train_station",
    TRAVEL_AGENCY => "travel_agency",
    UNIVERSITY => "university",
    VETERINARY_CARE => "veterinary_care",
    ZOO => "zoo",
}

impl FeatureType {
    pub fn new(value: impl Into<Cow<'static, str>>) -> Self {
        FeatureType(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the search endpoints accept this type as a filter.
    pub fn is_searchable(&self) -> bool {
        FeatureType::SEARCHABLE.contains(self)
    }
}

impl From<&'static str> for FeatureType {
    fn from(value: &'static str) -> Self {
        FeatureType(Cow::Borrowed(value))
    }
}

impl From<String> for FeatureType {
    fn from(value: String) -> Self {
        FeatureType(Cow::Owned(value))
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
