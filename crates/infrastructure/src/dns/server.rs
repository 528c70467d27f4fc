use crate::dns::forwarding::RecordTypeMapper;
use relay_dns_application::use_cases::HandleDnsQueryUseCase;
use hickory_proto::op::ResponseCode;
use hickory_proto::rr::{Name, RData, Record};
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, error};

/// Bridges the hickory-server runtime to the query use case: decoded
/// question in, answer record set out, wire concerns stay here.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    fn normalize_domain(domain: &str) -> String {
        domain.trim_end_matches('.').to_string()
    }
}

#[async_trait::async_trait]
impl RequestHandler for DnsServerHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = &request_info.query;
        let domain = Self::normalize_domain(&query.name().to_utf8());
        let hickory_record_type = query.query_type();
        let client_ip = request.src().ip();

        debug!(domain = %domain, record_type = ?hickory_record_type, client = %client_ip, "DNS query received");

        // Questions outside the recognized type set are acknowledged with
        // an empty answer section, same as recognized-but-unanswered types.
        let records = match RecordTypeMapper::from_hickory(hickory_record_type) {
            Some(record_type) => {
                let dns_query = relay_dns_domain::DnsQuery::new(domain.clone(), record_type);
                self.use_case.execute(&dns_query).await
            }
            None => {
                debug!(record_type = ?hickory_record_type, "Unrecognized record type");
                vec![]
            }
        };

        let answer_name = Name::from_str(&domain).unwrap_or_else(|_| Name::root());
        let answers: Vec<Record> = records
            .iter()
            .map(|record| {
                Record::from_rdata(
                    answer_name.clone(),
                    record.ttl,
                    RData::A(hickory_proto::rr::rdata::A(record.address)),
                )
            })
            .collect();

        debug!(domain = %domain, answers = answers.len(), "Sending response");

        let builder = MessageResponseBuilder::from_message_request(request);
        let mut header = *request.header();
        header.set_recursion_available(true);
        if !answers.is_empty() {
            header.set_authoritative(true);
        }
        let response = builder.build(header, answers.iter(), &[], &[], &[]);

        match response_handle.send_response(response).await {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to send response");
                ResponseInfo::from(*request.header())
            }
        }
    }
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let builder = MessageResponseBuilder::from_message_request(request);
    let mut header = *request.header();
    header.set_response_code(code);
    header.set_recursion_available(true);
    let response = builder.build(header, &[], &[], &[], &[]);

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send error response");
            ResponseInfo::from(*request.header())
        }
    }
}
