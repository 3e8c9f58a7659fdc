mod mapper_test;
mod paging_test;
mod projection_test;

use fake::faker::address::en::{CityName, StreetName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::FreeEmail;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use nitrite_projection::collection::Document;
use nitrite_projection::common::{read_field, Convertible, Value};
use nitrite_projection::errors::{ErrorKind, NitriteError, NitriteResult};

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Employee {
    pub emp_id: Option<u64>,
    pub address: Option<String>,
    pub email_address: Option<String>,
    pub company: Option<Company>,
    pub employee_note: Option<Note>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Company {
    pub company_id: Option<u64>,
    pub company_name: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Note {
    pub note_id: Option<u64>,
    pub text: Option<String>,
}

/// A narrower view of [Employee].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SubEmployee {
    pub emp_id: Option<u64>,
    pub address: Option<String>,
}

fn as_document<'a>(value: &'a Value, entity: &str) -> NitriteResult<&'a Document> {
    value.as_document().ok_or_else(|| {
        NitriteError::new(
            &format!("{} must be a document", entity),
            ErrorKind::ObjectMappingError,
        )
    })
}

impl Convertible for Employee {
    type Output = Employee;

    fn to_value(&self) -> NitriteResult<Value> {
        let mut doc = Document::new();
        doc.put("emp_id", self.emp_id)?;
        doc.put("address", self.address.clone())?;
        doc.put("email_address", self.email_address.clone())?;
        doc.put("company", self.company.to_value()?)?;
        doc.put("employee_note", self.employee_note.to_value()?)?;
        Ok(Value::Document(doc))
    }

    fn from_value(value: &Value) -> NitriteResult<Self::Output> {
        let doc = as_document(value, "Employee")?;
        Ok(Employee {
            emp_id: read_field::<Option<u64>>(doc, "emp_id")?,
            address: read_field::<Option<String>>(doc, "address")?,
            email_address: read_field::<Option<String>>(doc, "email_address")?,
            company: read_field::<Option<Company>>(doc, "company")?,
            employee_note: read_field::<Option<Note>>(doc, "employee_note")?,
        })
    }
}

impl Convertible for Company {
    type Output = Company;

    fn to_value(&self) -> NitriteResult<Value> {
        let mut doc = Document::new();
        doc.put("company_id", self.company_id)?;
        doc.put("company_name", self.company_name.clone())?;
        Ok(Value::Document(doc))
    }

    fn from_value(value: &Value) -> NitriteResult<Self::Output> {
        let doc = as_document(value, "Company")?;
        Ok(Company {
            company_id: read_field::<Option<u64>>(doc, "company_id")?,
            company_name: read_field::<Option<String>>(doc, "company_name")?,
        })
    }
}

impl Convertible for Note {
    type Output = Note;

    fn to_value(&self) -> NitriteResult<Value> {
        let mut doc = Document::new();
        doc.put("note_id", self.note_id)?;
        doc.put("text", self.text.clone())?;
        Ok(Value::Document(doc))
    }

    fn from_value(value: &Value) -> NitriteResult<Self::Output> {
        let doc = as_document(value, "Note")?;
        Ok(Note {
            note_id: read_field::<Option<u64>>(doc, "note_id")?,
            text: read_field::<Option<String>>(doc, "text")?,
        })
    }
}

impl Convertible for SubEmployee {
    type Output = SubEmployee;

    fn to_value(&self) -> NitriteResult<Value> {
        let mut doc = Document::new();
        doc.put("emp_id", self.emp_id)?;
        doc.put("address", self.address.clone())?;
        Ok(Value::Document(doc))
    }

    fn from_value(value: &Value) -> NitriteResult<Self::Output> {
        let doc = as_document(value, "SubEmployee")?;
        Ok(SubEmployee {
            emp_id: read_field::<Option<u64>>(doc, "emp_id")?,
            address: read_field::<Option<String>>(doc, "address")?,
        })
    }
}

pub fn generate_company() -> Company {
    Company {
        company_id: Some(rand::random::<u64>()),
        company_name: Some(CompanyName().fake::<String>()),
    }
}

pub fn generate_note() -> Note {
    Note {
        note_id: Some(rand::random::<u64>()),
        text: Some(Sentence(3..8).fake::<String>()),
    }
}

pub fn generate_employee() -> Employee {
    Employee {
        emp_id: Some(rand::random::<u64>()),
        address: Some(format!(
            "{}, {}",
            StreetName().fake::<String>(),
            CityName().fake::<String>()
        )),
        email_address: Some(FreeEmail().fake::<String>()),
        company: None,
        employee_note: Some(generate_note()),
    }
}

pub fn generate_employee_records(count: u32) -> Vec<Employee> {
    let company = generate_company();
    (0..count)
        .map(|_| {
            let mut employee = generate_employee();
            employee.company = Some(company.clone());
            employee
        })
        .collect()
}

pub fn sub_employee(employee: &Employee) -> SubEmployee {
    SubEmployee {
        emp_id: employee.emp_id,
        address: employee.address.clone(),
    }
}
