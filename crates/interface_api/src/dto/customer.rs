//! Customer DTOs
//!
//! Field names follow the public wire format (`nome`, `idcognito`, `cpf`).

use serde::{Deserialize, Serialize};
use validator::Validate;

use domain_customer::{Customer, RegisterCustomer};

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "nome must not be empty"))]
    pub nome: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "idcognito must not be empty"))]
    pub idcognito: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub cpf: Option<String>,
}

impl From<CreateCustomerRequest> for RegisterCustomer {
    fn from(request: CreateCustomerRequest) -> Self {
        RegisterCustomer {
            name: request.nome,
            auth_subject: request.idcognito,
            email: request.email,
            tax_id: request.cpf,
        }
    }
}

/// Customer body; a lookup miss renders every field zero-valued
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub email: String,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.value(),
            cpf: customer.tax_id_str().unwrap_or_default().to_string(),
            email: customer.email_str().unwrap_or_default().to_string(),
            nome: customer.name,
        }
    }
}

impl From<Option<Customer>> for CustomerResponse {
    fn from(customer: Option<Customer>) -> Self {
        customer.unwrap_or_else(Customer::empty).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::CustomerId;
    use domain_customer::TaxId;

    #[test]
    fn test_miss_renders_zero_values() {
        let body = CustomerResponse::from(None::<Customer>);
        assert_eq!(
            body,
            CustomerResponse {
                id: 0,
                nome: String::new(),
                cpf: String::new(),
                email: String::new(),
            }
        );
    }

    #[test]
    fn test_absent_email_renders_empty() {
        let mut customer = Customer::new(
            "Maria",
            None,
            Some(TaxId::parse("123.456.789-09").unwrap()),
            Some("sub".to_string()),
        );
        customer.id = CustomerId::new(3);

        let body = CustomerResponse::from(customer);
        assert_eq!(body.id, 3);
        assert_eq!(body.cpf, "123.456.789-09");
        assert_eq!(body.email, "");
    }

    #[test]
    fn test_request_validation() {
        let request = CreateCustomerRequest {
            nome: String::new(),
            idcognito: "sub".to_string(),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        let request = CreateCustomerRequest {
            nome: "Maria".to_string(),
            idcognito: "sub".to_string(),
            ..Default::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_request_maps_to_command() {
        let request: CreateCustomerRequest = serde_json::from_str(
            r#"{"nome":"Maria","idcognito":"sub","cpf":"123.456.789-09"}"#,
        )
        .unwrap();
        let command = RegisterCustomer::from(request);

        assert_eq!(command.name, "Maria");
        assert_eq!(command.auth_subject, "sub");
        assert_eq!(command.tax_id.as_deref(), Some("123.456.789-09"));
        assert!(command.email.is_none());
    }
}
