//! Общие контракты (DTO) между фронтендом и REST backend.
//!
//! Crate не содержит бизнес-логики: только сериализуемые типы,
//! разделяемые клиентом и сервером.

pub mod domain;
pub mod enums;
pub mod shared;
pub mod usecases;
