#![allow(dead_code)]

use async_trait::async_trait;
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use relaydns_application::ports::DnsExchange;
use relaydns_domain::{ForwardError, ServerEndpoint};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::str::FromStr;
use std::sync::Mutex;

pub fn make_query(id: u16, name: &str) -> Message {
    let mut question = Query::new();
    question.set_name(Name::from_str(name).unwrap());
    question.set_query_type(RecordType::A);
    question.set_query_class(DNSClass::IN);

    let mut message = Message::new();
    message.set_id(id);
    message.set_message_type(MessageType::Query);
    message.set_op_code(OpCode::Query);
    message.set_recursion_desired(true);
    message.add_query(question);
    message
}

pub fn a_record(name: &str, ip: [u8; 4]) -> Record {
    Record::from_rdata(
        Name::from_str(name).unwrap(),
        300,
        RData::A(A(Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]))),
    )
}

pub fn make_answer(id: u16, name: &str, ip: [u8; 4]) -> Message {
    let mut message = Message::new();
    message.set_id(id);
    message.set_message_type(MessageType::Response);
    message.set_op_code(OpCode::Query);
    message.set_response_code(ResponseCode::NoError);
    message.add_answer(a_record(name, ip));
    message
}

/// Scripted exchange: each host either fails with a fixed error or answers
/// with a fixed message. Records the order endpoints were attempted in.
pub struct MockDnsExchange {
    outcomes: Mutex<HashMap<String, Result<Message, ForwardError>>>,
    attempts: Mutex<Vec<String>>,
}

impl MockDnsExchange {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(HashMap::new()),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn succeed(&self, host: &str, message: Message) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(host.to_string(), Ok(message));
    }

    pub fn fail(&self, host: &str, error: ForwardError) {
        self.outcomes
            .lock()
            .unwrap()
            .insert(host.to_string(), Err(error));
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsExchange for MockDnsExchange {
    async fn exchange(
        &self,
        endpoint: &ServerEndpoint,
        _query: &Message,
    ) -> Result<Message, ForwardError> {
        self.attempts.lock().unwrap().push(endpoint.to_string());
        match self.outcomes.lock().unwrap().get(&endpoint.host) {
            Some(outcome) => outcome.clone(),
            None => Err(ForwardError::Timeout {
                server: endpoint.to_string(),
                protocol: "UDP",
            }),
        }
    }
}
