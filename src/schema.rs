//! Element paths of the bureau `INProfileResponse` document.
//!
//! Paths under the profile are relative to the profile node; account paths are
//! relative to one `CAIS_Account_DETAILS` entry.

pub const PROFILE: &str = "INProfileResponse";

// Applicant
pub const APPLICANT: &[&str] = &[
    "Current_Application",
    "Current_Application_Details",
    "Current_Applicant_Details",
];
pub const FIRST_NAME: &[&str] = &["First_Name"];
pub const LAST_NAME: &[&str] = &["Last_Name"];
pub const MOBILE_PHONE: &[&str] = &["MobilePhoneNumber"];

// Score
pub const SCORE: &[&str] = &["SCORE"];
pub const BUREAU_SCORE: &[&str] = &["BureauScore"];

// Accounts
pub const CAIS_ACCOUNT: &[&str] = &["CAIS_Account"];
pub const ACCOUNT_DETAILS: &[&str] = &["CAIS_Account", "CAIS_Account_DETAILS"];
pub const ACCOUNT_NUMBER: &[&str] = &["Account_Number"];
pub const SUBSCRIBER_NAME: &[&str] = &["Subscriber_Name"];
pub const CURRENT_BALANCE: &[&str] = &["Current_Balance"];
pub const AMOUNT_PAST_DUE: &[&str] = &["Amount_Past_Due"];
pub const HOLDER_PAN: &[&str] = &["CAIS_Holder_Details", "Income_TAX_PAN"];
pub const HOLDER_ADDRESS: &[&str] = &["CAIS_Holder_Address_Details"];
pub const ADDRESS_LINES: [&str; 4] = [
    "First_Line_Of_Address_non_normalized",
    "Second_Line_Of_Address_non_normalized",
    "Third_Line_Of_Address_non_normalized",
    "City_non_normalized",
];

// Summary
pub const CREDIT_ACCOUNT_SUMMARY: &[&str] = &["CAIS_Account", "CAIS_Summary", "Credit_Account"];
pub const OUTSTANDING_BALANCE_SUMMARY: &[&str] =
    &["CAIS_Account", "CAIS_Summary", "Total_Outstanding_Balance"];
pub const CREDIT_ACCOUNT_TOTAL: &str = "CreditAccountTotal";
pub const CREDIT_ACCOUNT_ACTIVE: &str = "CreditAccountActive";
pub const CREDIT_ACCOUNT_CLOSED: &str = "CreditAccountClosed";
pub const OUTSTANDING_BALANCE_ALL: &str = "Outstanding_Balance_All";
pub const OUTSTANDING_BALANCE_SECURED: &str = "Outstanding_Balance_Secured";
pub const OUTSTANDING_BALANCE_UNSECURED: &str = "Outstanding_Balance_UnSecured";

// Enquiries
pub const ENQUIRY_LAST_7_DAYS: &[&str] = &["TotalCAPS_Summary", "TotalCAPSLast7Days"];
