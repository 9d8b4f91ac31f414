//! Loading monthly files from a fixture data directory

use assert_matches::assert_matches;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use pxdata::{DataFile, ErrorKind, PxDataError};
use test_log::test;

use crate::common::fixtures::{self, DataDir};
use crate::common::logging;

#[test]
fn test_load_address_data_without_header() {
    let data = DataDir::new();
    data.write(DataFile::Address, 2013, 4, fixtures::ADDRESS_CSV);

    let addresses = data.loader().load_address_data(2013, 4).unwrap();
    logging::log_test_data("addresses", &addresses);

    assert_eq!(addresses.len(), 2);

    let first = &addresses[0];
    assert_eq!(first.year_month, NaiveDate::from_ymd_opt(2013, 4, 1).unwrap());
    assert_eq!(first.practice_code, "A81001");
    assert_eq!(first.practice_name, "THE DENSHAM SURGERY");
    assert_eq!(first.addr1, "THE HEALTH CENTRE");
    assert_eq!(first.addr2, "LAWSON STREET");
    assert_eq!(first.addr3, "STOCKTON");
    assert_eq!(first.addr4, "CLEVELAND");
    assert_eq!(first.postcode, "TS18 1HU");

    assert_eq!(addresses[1].practice_code, "A81002");
    assert_eq!(addresses[1].postcode, "TS18 2AW");
}

#[test]
fn test_load_chems_data_discards_header() {
    let data = DataDir::new();
    data.write(DataFile::Chemicals, 2013, 4, fixtures::CHEMICALS_CSV);

    let chems = data.loader().load_chems_data(2013, 4).unwrap();

    assert_eq!(chems.len(), 3);
    assert_eq!(chems[0].chem_code, "0101010A0");
    assert_eq!(chems[0].chem_name, "Alexitol Sodium");
    assert_eq!(chems[2].chem_name, "Aluminium Hydroxide");
}

#[test]
fn test_load_prescription_data() {
    let data = DataDir::new();
    data.write(DataFile::Prescriptions, 2013, 4, fixtures::PRESCRIPTIONS_CSV);

    let prescriptions = data.loader().load_prescription_data(2013, 4).unwrap();

    assert_eq!(prescriptions.len(), 2);

    let first = &prescriptions[0];
    assert_eq!(first.sha, "Q30");
    assert_eq!(first.pct, "00K");
    assert_eq!(first.practice_code, "A81001");
    assert_eq!(first.bnf_code, "0101010G0AAABAB");
    assert_eq!(first.bnf_name, "Co-Magaldrox_Susp 195mg/220mg/5ml S/F");
    assert_eq!(first.line_count_dispensed, Some(2));
    assert_eq!(first.net_cost, Some(5.64));
    assert_eq!(first.actual_cost, Some(5.24));
    assert_eq!(first.quantity_dispensed, Some(1500.0));
    assert_eq!(first.year_month, NaiveDate::from_ymd_opt(2013, 4, 1).unwrap());

    assert_eq!(prescriptions[1].line_count_dispensed, Some(3));
}

#[test]
fn test_load_prescription_blank_cost() {
    let data = DataDir::new();
    data.write(
        DataFile::Prescriptions,
        2013,
        4,
        "SHA,PCT,PRACTICE,BNF CODE,BNF NAME,ITEMS,NIC,ACT COST,QUANTITY,PERIOD\n\
         Q30,00K,A81001,0101010G0AAABAB,Co-Magaldrox,2,5.64,,1500,201304\n\
         Q30,00K,A81001,0101021B0AAAHAH,Alginate,,,,,201304\n",
    );

    let prescriptions = data.loader().load_prescription_data(2013, 4).unwrap();

    assert_eq!(prescriptions.len(), 2);
    assert_eq!(prescriptions[0].net_cost, Some(5.64));
    assert_eq!(prescriptions[0].actual_cost, None);
    assert_eq!(prescriptions[1].line_count_dispensed, None);
    assert_eq!(prescriptions[1].quantity_dispensed, None);
    assert_eq!(
        prescriptions[1].year_month,
        NaiveDate::from_ymd_opt(2013, 4, 1).unwrap()
    );
}

#[test]
fn test_load_missing_file() {
    let data = DataDir::new();

    let err = data.loader().load_address_data(2013, 4).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Io);
    assert_matches!(err, PxDataError::FileNotFound { ref path } if path.ends_with("2013_04_April/T201304ADDR BNFT.CSV"));
}

#[test]
fn test_load_rejects_invalid_month() {
    let data = DataDir::new();
    let err = data.loader().load_chems_data(2013, 13).unwrap_err();
    assert_matches!(err, PxDataError::InvalidMonth { month: 13 });
}

#[test]
fn test_load_address_bad_date() {
    let data = DataDir::new();
    data.write(
        DataFile::Address,
        2013,
        4,
        "201304,A81001,SURGERY,A,B,C,D,TS18 1HU\n2013-4,A81002,SURGERY,A,B,C,D,TS18 2AW\n",
    );

    let err = data.loader().load_address_data(2013, 4).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Parse);
    assert_matches!(err, PxDataError::Parse { line: 2, ref message, .. } if message.contains("Year-Month"));
}

#[test]
fn test_load_prescription_bad_period() {
    let data = DataDir::new();
    data.write(
        DataFile::Prescriptions,
        2013,
        4,
        "SHA,PCT,PRACTICE,BNF CODE,BNF NAME,ITEMS,NIC,ACT COST,QUANTITY,PERIOD\n\
         Q30,00K,A81001,0101010G0AAABAB,Co-Magaldrox,2,5.64,5.24,1500,201313\n",
    );

    let err = data.loader().load_prescription_data(2013, 4).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Parse);
}

#[test]
fn test_load_address_wrong_column_count() {
    let data = DataDir::new();
    data.write(DataFile::Address, 2013, 4, "201304,A81001,SURGERY,TS18 1HU\n");

    let err = data.loader().load_address_data(2013, 4).unwrap_err();

    assert_matches!(err, PxDataError::Parse { line: 1, ref message, .. } if message == "expected 8 columns, found 4");
}

#[test]
fn test_header_only_file_is_empty() {
    let data = DataDir::new();
    data.write(DataFile::Chemicals, 2014, 1, "CHEM SUB,NAME\n");

    let chems = data.loader().load_chems_data(2014, 1).unwrap();
    assert!(chems.is_empty());
}
