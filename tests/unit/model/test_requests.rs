use assert_json_diff::assert_json_eq;
use serde_json::json;
use threec_client::model::contact::Contact;
use threec_client::model::requests::{
    AdjustWeightRequest, CreateMailingRequest, UploadContactsRequest, UploadRowsRequest,
};

#[test]
fn test_create_mailing_request_omits_missing_meta() {
    let request = CreateMailingRequest::new("Março", 42);
    assert_json_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"name": "Março", "campaign_id": 42})
    );

    let request = request.with_meta(json!({"lote": 3}));
    assert_json_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"name": "Março", "campaign_id": 42, "meta": {"lote": 3}})
    );
}

#[test]
fn test_upload_contacts_request_shape() {
    let contacts = vec![
        Contact::new("Ana")
            .with_document("12345678900")
            .with_phone("11 98888-7777")
            .with_email("ana@example.com")
            .with_external_id("c-1"),
        Contact::default().with_phone("1133334444"),
    ];
    let request = UploadContactsRequest {
        mailing_id: 10,
        data: &contacts,
    };
    assert_json_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({
            "mailing_id": 10,
            "data": [
                {
                    "name": "Ana",
                    "document": "12345678900",
                    "phones": ["11988887777"],
                    "email": "ana@example.com",
                    "external_id": "c-1"
                },
                {"phones": ["1133334444"]}
            ]
        })
    );
}

#[test]
fn test_upload_rows_request_shape() {
    let rows = vec![json!(["Ana", "11988887777"])];
    let request = UploadRowsRequest {
        mailing_id: 3,
        data: &rows,
    };
    assert_json_eq!(
        serde_json::to_value(&request).unwrap(),
        json!({"mailing_id": 3, "data": [["Ana", "11988887777"]]})
    );
}

#[test]
fn test_adjust_weight_request_shape() {
    let request = AdjustWeightRequest {
        mailing_id: 991,
        weight: 5,
    };
    assert_json_eq!(
        serde_json::to_value(request).unwrap(),
        json!({"mailing_id": 991, "weight": 5})
    );
}
