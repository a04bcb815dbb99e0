//! Domain types for the Soramayo operations backend: roles, the permission
//! matrix, and the fuel / catering / attendance record families.

#![forbid(unsafe_code)]

mod access;
mod attendance;
mod catering;
mod fuel;
mod role;

pub use access::{Action, Module, capability, viewable_modules};
pub use attendance::{
    AttendanceDay, AttendanceEntry, AttendanceRecord, Employee, EmployeeId, NewEmployee,
};
pub use catering::{MealRecord, MealRecordId, MealType, NewMealRecord};
pub use fuel::{FuelRecord, FuelRecordId, FuelType, NewFuelRecord};
pub use role::Role;
