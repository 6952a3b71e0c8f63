use crate::lang::catalog::{AccountStrings, Catalog, ExceptionStrings, SocialStrings, StackStrings};

fn invalid_custom_field(field: &str) -> String {
    format!("Invalid {field} field")
}

/// English (United States)
pub static EN_US: Catalog = Catalog {
    code: "en-US",
    invalid_url: "Invalid URL",
    exception: ExceptionStrings {
        bad_request: "Invalid request",
        unauthorized: "Unauthorized",
        forbidden: "Access forbidden",
        not_found: "Resource not found or removed",
        method_not_allowed: "Method not allowed",
        conflict: "Data conflict",
        conflict_entity_already_exists: "A record with the given data already exists",
        unprocessable_entity: "Unprocessable entity",
        internal_server_error: "An internal error occurred",
        not_implemented: "Feature not implemented",
        service_unavailable: "Service unavailable",
        invalid_custom_field,
    },
    account: AccountStrings {
        invalid_name: "The given name is too short or was not considered valid",
        invalid_username: "The given username is too short or was not considered valid",
        invalid_email: "The e-mail address was not considered valid",
        invalid_password: "The given password is too weak",
        username_exist: "A user with the given username already exists",
        email_exist: "A user with the given e-mail already exists",
        not_found: "User not found",
        unauthorized: "Credentials not recognized",
        disabled_or_locked: "Account inactive or locked",
        new_email_be_different: "The new e-mail must differ from the current one",
        new_password_be_different: "The new password must differ from the current one",
        insufficient_permissions: "Insufficient permissions for this operation",
    },
    social: SocialStrings {
        invalid_identifier: "Invalid or empty identifier",
        invalid_details: "Details cannot be that long",
    },
    stack: StackStrings {
        slug_or_name_not_sent: "Slug or name not sent",
        slug_already_exists: "A stack with the generated slug already exists",
        name_field: "name",
        meta_description_field: "meta description",
    },
};
