#![allow(dead_code)]

use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{DNSClass, Name, RData, Record, RecordType};
use relaydns_infrastructure::dns::wire;
use std::net::{Ipv4Addr, SocketAddr};
use std::str::FromStr;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream, UdpSocket};

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

pub fn make_answer(id: u16, name: &str, ip: [u8; 4]) -> Message {
    let mut message = Message::new();
    message.set_id(id);
    message.set_message_type(MessageType::Response);
    message.set_op_code(OpCode::Query);
    message.set_response_code(ResponseCode::NoError);
    message.add_answer(Record::from_rdata(
        Name::from_str(name).unwrap(),
        300,
        RData::A(A(Ipv4Addr::new(ip[0], ip[1], ip[2], ip[3]))),
    ));
    message
}

pub fn make_truncated_answer(id: u16) -> Message {
    let mut message = Message::new();
    message.set_id(id);
    message.set_message_type(MessageType::Response);
    message.set_op_code(OpCode::Query);
    message.set_response_code(ResponseCode::NoError);
    message.set_truncated(true);
    message
}

pub fn encode(message: &Message) -> Vec<u8> {
    wire::serialize(message).unwrap()
}

/// Binds a UDP socket and a TCP listener on the same loopback port, retrying
/// until a port number free for both protocols is found.
pub async fn bind_udp_tcp_pair() -> (UdpSocket, TcpListener, SocketAddr) {
    loop {
        let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = udp.local_addr().unwrap();
        if let Ok(tcp) = TcpListener::bind(addr).await {
            return (udp, tcp, addr);
        }
    }
}

pub async fn write_frame(stream: &mut TcpStream, message: &Message) {
    let bytes = encode(message);
    stream
        .write_all(&(bytes.len() as u16).to_be_bytes())
        .await
        .unwrap();
    stream.write_all(&bytes).await.unwrap();
    stream.flush().await.unwrap();
}

/// Reads one length-prefixed frame and returns the parsed message.
pub async fn read_frame(stream: &mut TcpStream) -> Message {
    use tokio::io::AsyncReadExt;
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await.unwrap();
    let mut body = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    stream.read_exact(&mut body).await.unwrap();
    wire::parse(&body).unwrap()
}
