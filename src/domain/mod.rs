// Domain layer: resource records and the seams the client is built on.

pub mod coerce;
pub mod envelope;
pub mod location;
pub mod ports;
pub mod product;

pub use envelope::{Collection, Envelope, Meta, Pagination};
pub use location::{
    Address, Chain, DayHours, Department, DepartmentInfo, Geolocation, Hours, Location,
};
pub use product::{
    AisleLocation, Fulfillment, Image, ImageSize, Inventory, Item, ItemInformation, Price,
    Product, Temperature,
};
