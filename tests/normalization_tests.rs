/// Tests for bureau XML normalization
/// Covers defaults, cardinality handling, address/name assembly and failures
use credit_report_api::accessor::Node;
use credit_report_api::normalizer::normalize;
use credit_report_api::xml_tree::parse_tree;
use credit_report_api::{parse_credit_report, Account, Report, Summary};
use serde_json::{json, Value};

const SAMPLE_REPORT: &str = include_str!("fixtures/sample_report.xml");

/// Builds a document with the required branches, the given applicant fields
/// and whatever account elements are passed in.
fn document(applicant: &str, accounts: &str) -> String {
    format!(
        r#"<INProfileResponse>
  <Current_Application>
    <Current_Application_Details>
      <Current_Applicant_Details>{applicant}</Current_Applicant_Details>
    </Current_Application_Details>
  </Current_Application>
  <CAIS_Account>
    <CAIS_Summary>
      <Credit_Account/>
      <Total_Outstanding_Balance/>
    </CAIS_Summary>
    {accounts}
  </CAIS_Account>
  <SCORE><BureauScore>700</BureauScore></SCORE>
</INProfileResponse>"#
    )
}

fn account_xml(fields: &str) -> String {
    format!("<CAIS_Account_DETAILS>{fields}</CAIS_Account_DETAILS>")
}

#[cfg(test)]
mod sample_report_tests {
    use super::*;

    #[test]
    fn test_sample_identity() {
        let report = parse_credit_report(SAMPLE_REPORT).unwrap();
        let identity = &report.basic_details;

        assert_eq!(identity.name, "Sagar Sharma");
        assert_eq!(identity.mobile_phone, "9819137672");
        assert_eq!(identity.pan, "BNZPM2501F");
        assert_eq!(identity.credit_score, 719.0);
    }

    #[test]
    fn test_sample_summary() {
        let report = parse_credit_report(SAMPLE_REPORT).unwrap();
        assert_eq!(
            report.report_summary,
            Summary {
                total_accounts: 4.0,
                active_accounts: 3.0,
                closed_accounts: 1.0,
                current_balance: 100000.0,
                secured_amount: 85000.0,
                unsecured_amount: 15000.0,
                last_7_days_enquiries: 1.0,
            }
        );
    }

    #[test]
    fn test_sample_accounts() {
        let report = parse_credit_report(SAMPLE_REPORT).unwrap();
        assert_eq!(
            report.credit_accounts,
            vec![
                Account {
                    account_number: "ACC-1001".to_string(),
                    bank_name: "Axis Bank".to_string(),
                    current_balance: 85000.0,
                    overdue_amount: 2500.0,
                    address: "Flat 4B, Sunrise Towers, Andheri East, Mumbai".to_string(),
                },
                Account {
                    account_number: "ACC-2002".to_string(),
                    bank_name: "HDFC Bank".to_string(),
                    current_balance: 15000.0,
                    overdue_amount: 0.0,
                    address: "12 MG Road, Pune".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_sample_summary_is_not_reconciled_with_accounts() {
        // Summary says 4 accounts; only 2 are listed.
        let report = parse_credit_report(SAMPLE_REPORT).unwrap();
        assert_eq!(report.report_summary.total_accounts, 4.0);
        assert_eq!(report.credit_accounts.len(), 2);
    }

    #[test]
    fn test_sample_canonical_json() {
        let report = parse_credit_report(SAMPLE_REPORT).unwrap();
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["basicDetails"]["creditScore"], json!(719));
        assert_eq!(value["reportSummary"]["currentBalance"], json!(100000));
        assert_eq!(value["reportSummary"]["last7DaysEnquiries"], json!(1));
        assert_eq!(value["creditAccounts"][1]["overdueAmount"], json!(0));
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let first = parse_credit_report(SAMPLE_REPORT.as_bytes()).unwrap();
        let second = parse_credit_report(SAMPLE_REPORT.as_bytes()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_bytes_and_text_inputs_agree() {
        let from_bytes = parse_credit_report(SAMPLE_REPORT.as_bytes().to_vec()).unwrap();
        let from_text = parse_credit_report(SAMPLE_REPORT.to_string()).unwrap();
        assert_eq!(from_bytes, from_text);
    }
}

#[cfg(test)]
mod default_tests {
    use super::*;

    #[test]
    fn test_minimal_document_defaults() {
        let report = parse_credit_report(document("", "")).unwrap();

        assert!(report.credit_accounts.is_empty());
        assert_eq!(report.report_summary, Summary::default());
        assert_eq!(report.basic_details.name, "");
        assert_eq!(report.basic_details.mobile_phone, "");
        assert_eq!(report.basic_details.pan, "");
        assert_eq!(report.basic_details.credit_score, 700.0);
    }

    #[test]
    fn test_missing_enquiry_count_defaults_to_zero() {
        let report = parse_credit_report(SAMPLE_REPORT.replace(
            "<TotalCAPSLast7Days>1</TotalCAPSLast7Days>",
            "",
        ))
        .unwrap();
        assert_eq!(report.report_summary.last_7_days_enquiries, 0.0);
    }

    #[test]
    fn test_non_numeric_score_defaults_to_zero() {
        let xml = document("", "").replace(
            "<BureauScore>700</BureauScore>",
            "<BureauScore>N/A</BureauScore>",
        );
        assert_eq!(parse_credit_report(xml).unwrap().basic_details.credit_score, 0.0);
    }

    #[test]
    fn test_fractional_score_is_kept() {
        let xml = document("", "").replace(
            "<BureauScore>700</BureauScore>",
            "<BureauScore>712.5</BureauScore>",
        );
        let report = parse_credit_report(xml).unwrap();
        assert_eq!(report.basic_details.credit_score, 712.5);

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["basicDetails"]["creditScore"], json!(712.5));
    }

    #[test]
    fn test_empty_score_section_defaults_to_zero() {
        let xml = document("", "").replace("<SCORE><BureauScore>700</BureauScore></SCORE>", "<SCORE/>");
        assert_eq!(parse_credit_report(xml).unwrap().basic_details.credit_score, 0.0);
    }
}

#[cfg(test)]
mod cardinality_tests {
    use super::*;

    fn wrap_accounts_in_sequence(tree: &mut Value) {
        let accounts = &mut tree["INProfileResponse"]["CAIS_Account"]["CAIS_Account_DETAILS"];
        let single = accounts.take();
        *accounts = Value::Array(vec![single]);
    }

    #[test]
    fn test_single_node_and_one_element_sequence_agree() {
        let xml = document(
            "",
            &account_xml(
                "<Account_Number>A1</Account_Number><Subscriber_Name>SBI</Subscriber_Name>\
                 <Current_Balance>10</Current_Balance>",
            ),
        );
        let single_tree = parse_tree(&xml).unwrap();
        let mut sequence_tree = single_tree.clone();
        wrap_accounts_in_sequence(&mut sequence_tree);
        assert!(sequence_tree["INProfileResponse"]["CAIS_Account"]["CAIS_Account_DETAILS"].is_array());

        let from_single: Report = normalize(Node::new(&single_tree)).unwrap();
        let from_sequence: Report = normalize(Node::new(&sequence_tree)).unwrap();

        assert_eq!(from_single.credit_accounts.len(), 1);
        assert_eq!(from_single.credit_accounts, from_sequence.credit_accounts);
        assert_eq!(from_single, from_sequence);
    }

    #[test]
    fn test_account_count_matches_source() {
        for count in 0..5 {
            let accounts: String = (0..count)
                .map(|i| account_xml(&format!("<Account_Number>A{i}</Account_Number>")))
                .collect();
            let report = parse_credit_report(document("", &accounts)).unwrap();
            assert_eq!(report.credit_accounts.len(), count);
        }
    }

    #[test]
    fn test_accounts_keep_document_order() {
        let accounts: String = ["first", "second", "third"]
            .iter()
            .map(|n| account_xml(&format!("<Account_Number>{n}</Account_Number>")))
            .collect();
        let report = parse_credit_report(document("", &accounts)).unwrap();
        let numbers: Vec<&str> = report
            .credit_accounts
            .iter()
            .map(|a| a.account_number.as_str())
            .collect();
        assert_eq!(numbers, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_duplicated_singular_section_uses_first() {
        let xml = document("", "").replace(
            "<SCORE><BureauScore>700</BureauScore></SCORE>",
            "<SCORE><BureauScore>650</BureauScore></SCORE><SCORE><BureauScore>800</BureauScore></SCORE>",
        );
        assert_eq!(parse_credit_report(xml).unwrap().basic_details.credit_score, 650.0);
    }

    #[test]
    fn test_repeated_holder_address_uses_first() {
        let account = account_xml(
            "<CAIS_Holder_Address_Details><City_non_normalized>Delhi</City_non_normalized></CAIS_Holder_Address_Details>\
             <CAIS_Holder_Address_Details><City_non_normalized>Chennai</City_non_normalized></CAIS_Holder_Address_Details>",
        );
        let report = parse_credit_report(document("", &account)).unwrap();
        assert_eq!(report.credit_accounts[0].address, "Delhi");
    }
}

#[cfg(test)]
mod field_tests {
    use super::*;

    fn single_account(fields: &str) -> Account {
        let report = parse_credit_report(document("", &account_xml(fields))).unwrap();
        report.credit_accounts.into_iter().next().unwrap()
    }

    #[test]
    fn test_address_skips_blank_middle_lines() {
        let account = single_account(
            "<CAIS_Holder_Address_Details>\
               <First_Line_Of_Address_non_normalized>line1</First_Line_Of_Address_non_normalized>\
               <Second_Line_Of_Address_non_normalized>   </Second_Line_Of_Address_non_normalized>\
               <Third_Line_Of_Address_non_normalized></Third_Line_Of_Address_non_normalized>\
               <City_non_normalized>line4</City_non_normalized>\
             </CAIS_Holder_Address_Details>",
        );
        assert_eq!(account.address, "line1, line4");
    }

    #[test]
    fn test_address_without_lines_is_empty() {
        assert_eq!(single_account("").address, "");
        assert_eq!(
            single_account("<CAIS_Holder_Address_Details/>").address,
            ""
        );
    }

    #[test]
    fn test_address_ignores_other_fields() {
        let account = single_account(
            "<CAIS_Holder_Address_Details>\
               <City_non_normalized>Nagpur</City_non_normalized>\
               <ZIP_Postal_Code_non_normalized>440001</ZIP_Postal_Code_non_normalized>\
             </CAIS_Holder_Address_Details>",
        );
        assert_eq!(account.address, "Nagpur");
    }

    #[test]
    fn test_negative_balance_keeps_sign() {
        let account = single_account("<Current_Balance>-500</Current_Balance>");
        assert_eq!(account.current_balance, -500.0);
    }

    #[test]
    fn test_fractional_amount_is_not_rounded() {
        let account = single_account("<Amount_Past_Due>1234.56</Amount_Past_Due>");
        assert_eq!(account.overdue_amount, 1234.56);
    }

    #[test]
    fn test_non_numeric_and_absent_balances_default() {
        let account = single_account("<Current_Balance>twelve</Current_Balance>");
        assert_eq!(account.current_balance, 0.0);
        assert_eq!(account.overdue_amount, 0.0);
        assert_eq!(account.account_number, "");
        assert_eq!(account.bank_name, "");
    }

    #[test]
    fn test_name_with_only_first_name() {
        let report = parse_credit_report(document("<First_Name>Asha</First_Name>", "")).unwrap();
        assert_eq!(report.basic_details.name, "Asha");
    }

    #[test]
    fn test_name_with_only_last_name() {
        let report = parse_credit_report(document("<Last_Name>Rao</Last_Name>", "")).unwrap();
        assert_eq!(report.basic_details.name, "Rao");
    }

    #[test]
    fn test_name_is_trimmed() {
        let report = parse_credit_report(document(
            "<First_Name>  Asha</First_Name><Last_Name>Rao  </Last_Name>",
            "",
        ))
        .unwrap();
        assert_eq!(report.basic_details.name, "Asha Rao");
    }

    #[test]
    fn test_pan_comes_from_first_account_only() {
        let accounts = format!(
            "{}{}",
            account_xml("<Account_Number>A1</Account_Number>"),
            account_xml(
                "<CAIS_Holder_Details><Income_TAX_PAN>ABCDE1234F</Income_TAX_PAN></CAIS_Holder_Details>"
            ),
        );
        let report = parse_credit_report(document(
            "<IncomeTaxPan>QWERT5678Y</IncomeTaxPan>",
            &accounts,
        ))
        .unwrap();
        assert_eq!(report.basic_details.pan, "");
    }

    #[test]
    fn test_attribute_bearing_amount() {
        let account = single_account(r#"<Current_Balance currency="INR">750</Current_Balance>"#);
        assert_eq!(account.current_balance, 750.0);
    }
}

#[cfg(test)]
mod failure_tests {
    use super::*;

    #[test]
    fn test_absent_root_profile() {
        let err = parse_credit_report("<CreditReport><SCORE/></CreditReport>").unwrap_err();
        assert!(err.message.contains("INProfileResponse"), "{}", err);
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_credit_report("<INProfileResponse><SCORE></INProfileResponse>").unwrap_err();
        assert!(err.message.starts_with("Failed to parse XML:"), "{}", err);
    }

    #[test]
    fn test_empty_input() {
        let err = parse_credit_report(Vec::new()).unwrap_err();
        assert!(err.message.contains("no root element"), "{}", err);
    }

    #[test]
    fn test_missing_summary_branch() {
        let xml = document("", "").replace("<Total_Outstanding_Balance/>", "");
        let err = parse_credit_report(xml).unwrap_err();
        assert!(err.message.contains("Total_Outstanding_Balance"), "{}", err);
    }

    #[test]
    fn test_missing_applicant_branch() {
        let xml = SAMPLE_REPORT.replace("Current_Application_Details>", "Application_Details>");
        let err = parse_credit_report(xml).unwrap_err();
        assert!(err.message.contains("Current_Applicant_Details"), "{}", err);
    }

    #[test]
    fn test_missing_account_branch() {
        let xml = r#"<INProfileResponse>
  <Current_Application><Current_Application_Details>
    <Current_Applicant_Details><First_Name>Asha</First_Name></Current_Applicant_Details>
  </Current_Application_Details></Current_Application>
  <SCORE><BureauScore>700</BureauScore></SCORE>
</INProfileResponse>"#;
        let err = parse_credit_report(xml).unwrap_err();
        assert_eq!(
            err.message,
            "Failed to parse XML: missing required element `CAIS_Account`"
        );
    }
}
