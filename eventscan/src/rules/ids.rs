//! Centralized rule ids.

/// Virtual field-like event: `public virtual event EventHandler<T> Changed;`
pub const RULE_ID_VIRTUAL_FIELD_EVENT: &str = "EVS-V001";
/// Virtual accessor-like event: `public virtual event EventHandler<T> Changed { add ... remove ... }`
pub const RULE_ID_VIRTUAL_PROPERTY_EVENT: &str = "EVS-V002";

/// Category shared by the event rules.
pub const CATEGORY_DESIGN_PRACTICES: &str = "Design Practices";
