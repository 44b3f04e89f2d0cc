//! Proforma model
//!
//! A priced offer with a flat list of lines and sales tax. The struct serializes directly
//! to the document posted to the `proformas` resource.

use qp_core::Id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProformaDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,

    #[serde(rename = "asunto")]
    pub subject: String,
    #[serde(rename = "lugar_entrega")]
    pub delivery_place: String,
    #[serde(rename = "forma_pago")]
    pub payment_terms: String,
    #[serde(rename = "moneda")]
    pub currency: String,

    #[serde(rename = "fecha_inicial")]
    pub start_date: String,
    #[serde(rename = "fecha_entrega")]
    pub delivery_date: String,
    #[serde(rename = "dias", default)]
    pub days: i64,

    #[serde(rename = "id_cliente")]
    pub client_id: Id,
    #[serde(rename = "id_vendedor")]
    pub seller_id: Id,

    /// Header discount, carried but not applied to totals
    #[serde(rename = "descuento", default, with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(rename = "valor_venta", default, with = "rust_decimal::serde::float")]
    pub sale_value: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub igv: Decimal,
    #[serde(rename = "importe_total", default, with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,

    #[serde(rename = "detalles", default)]
    pub lines: Vec<ProformaLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProformaLine {
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "UM")]
    pub unit_of_measure: String,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "precio_unit", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    #[serde(rename = "descuento", default, with = "rust_decimal::serde::float")]
    pub discount: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(rename = "incluye", default)]
    pub includes: Vec<ProformaInclude>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProformaInclude {
    #[serde(rename = "nombre")]
    pub name: String,
}

impl ProformaLine {
    pub fn new(
        description: impl Into<String>,
        unit_of_measure: impl Into<String>,
        quantity: i64,
        unit_price: Decimal,
    ) -> Self {
        Self {
            description: description.into(),
            unit_of_measure: unit_of_measure.into(),
            quantity,
            unit_price,
            discount: Decimal::ZERO,
            total: Decimal::ZERO,
            includes: Vec::new(),
        }
    }

    /// Header discount; totals ignore it
    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_include(mut self, name: impl Into<String>) -> Self {
        self.includes.push(ProformaInclude { name: name.into() });
        self
    }
}
