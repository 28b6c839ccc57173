use crate::{Cursor, Header, ParserError, Question, ResourceRecord};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// A DNS / mDNS message carrying at most one entry per section.
///
/// Section counts in the header only decide whether a section is parsed; a
/// count above one still yields a single entry. When writing, the counts are
/// derived from which sections are present.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Message {
    pub header: Header,
    pub question: Option<Question>,
    pub answer: Option<ResourceRecord>,
    pub authority: Option<ResourceRecord>,
    pub additional: Option<ResourceRecord>,
}

impl Message {
    pub fn parse(data: &[u8]) -> Result<Self, ParserError> {
        let mut cursor = Cursor::new(data);

        let header = Header::parse(&mut cursor)?;

        let question = if header.qd_count > 0 {
            Question::parse(&mut cursor)?
        } else {
            None
        };
        let answer = if header.an_count > 0 {
            ResourceRecord::parse(&mut cursor)?
        } else {
            None
        };
        let authority = if header.ns_count > 0 {
            ResourceRecord::parse(&mut cursor)?
        } else {
            None
        };
        let additional = if header.ar_count > 0 {
            ResourceRecord::parse(&mut cursor)?
        } else {
            None
        };

        Ok(Self {
            header,
            question,
            answer,
            authority,
            additional,
        })
    }

    pub fn write_to(&self, buf: &mut Vec<u8>) {
        self.counted_header().write_to(buf);

        if let Some(question) = &self.question {
            question.write_to(buf);
        }

        for record in [&self.answer, &self.authority, &self.additional]
            .into_iter()
            .flatten()
        {
            record.write_to(buf);
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        self.write_to(&mut buf);

        buf
    }

    /// Copy of the header with section counts set from section presence.
    pub fn counted_header(&self) -> Header {
        Header {
            qd_count: self.question.is_some() as u16,
            an_count: self.answer.is_some() as u16,
            ns_count: self.authority.is_some() as u16,
            ar_count: self.additional.is_some() as u16,
            ..self.header.clone()
        }
    }

    /// Raw RDATA of the answer record.
    pub fn answer_address(&self) -> Result<&[u8], ParserError> {
        self.answer
            .as_ref()
            .map(|answer| answer.rdata.as_slice())
            .ok_or(ParserError::MissingAnswer)
    }

    /// Answer RDATA as an IP address, when it is 4 or 16 bytes long.
    pub fn answer_ip(&self) -> Result<Option<IpAddr>, ParserError> {
        let rdata = self.answer_address()?;

        Ok(match rdata.len() {
            4 => <[u8; 4]>::try_from(rdata).ok().map(|o| Ipv4Addr::from(o).into()),
            16 => <[u8; 16]>::try_from(rdata)
                .ok()
                .map(|o| Ipv6Addr::from(o).into()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DomainName, CLASS_IN, TYPE_A};

    fn query() -> Message {
        Message {
            question: Some(Question {
                qname: "host.local".into(),
                qtype: TYPE_A,
                qclass: CLASS_IN,
            }),
            ..Default::default()
        }
    }

    fn answer(rdata: Vec<u8>) -> Message {
        Message {
            header: Header {
                qr: true,
                aa: true,
                ..Default::default()
            },
            answer: Some(ResourceRecord::new(
                "host.local".into(),
                TYPE_A,
                CLASS_IN,
                300,
                rdata,
            )),
            ..Default::default()
        }
    }

    #[test]
    fn query_bytes() {
        let bytes = query().to_bytes();

        assert_eq!(
            &bytes[..12],
            &[0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0],
            "only the question count is set"
        );
        assert_eq!(&bytes[12..], b"\x04host\x05local\x00\x00\x01\x00\x01");
    }

    #[test]
    fn counts_are_derived_not_copied() {
        let mut message = query();
        message.header.qd_count = 9;
        message.header.an_count = 3;
        message.header.ar_count = 1;

        let parsed = Message::parse(&message.to_bytes()).unwrap();

        assert_eq!(parsed.header.qd_count, 1);
        assert_eq!(parsed.header.an_count, 0);
        assert_eq!(parsed.header.ns_count, 0);
        assert_eq!(parsed.header.ar_count, 0);
        assert_eq!(parsed.question, message.question);
        assert_eq!(parsed.answer, None);
    }

    #[test]
    fn all_sections_round_trip() {
        let mut message = answer(vec![192, 168, 0, 7]);
        message.question = query().question;
        message.authority = Some(ResourceRecord::new(
            DomainName::PointerTo(12),
            2,
            CLASS_IN,
            60,
            b"\x02ns\xc0\x0c".to_vec(),
        ));
        message.additional = Some(ResourceRecord::new(
            "ns.host.local".into(),
            TYPE_A,
            CLASS_IN | 0x8000,
            120,
            vec![10, 0, 0, 53],
        ));

        let parsed = Message::parse(&message.to_bytes()).unwrap();

        assert_eq!(parsed.header, message.counted_header());
        assert_eq!(parsed.question, message.question);
        assert_eq!(parsed.answer, message.answer);
        assert_eq!(parsed.authority, message.authority);
        assert_eq!(parsed.additional, message.additional);
        assert!(parsed.additional.unwrap().cache_flush());
    }

    #[test]
    fn zero_question_count_skips_question_bytes() {
        let mut bytes = Message::default().to_bytes();
        bytes.extend(b"\x04host\x05local\x00\x00\x01\x00\x01");

        let parsed = Message::parse(&bytes).unwrap();

        assert_eq!(parsed.question, None);
        assert_eq!(parsed.answer, None);
    }

    #[test]
    fn count_without_bytes_yields_empty_section() {
        let mut bytes = Message::default().to_bytes();
        bytes[5] = 1;
        bytes[7] = 1;

        let parsed = Message::parse(&bytes).unwrap();

        assert_eq!(parsed.header.qd_count, 1);
        assert_eq!(parsed.question, None);
        assert_eq!(parsed.answer, None);
    }

    #[test]
    fn answer_address() {
        let message = Message::parse(&answer(vec![192, 168, 1, 20]).to_bytes()).unwrap();

        assert_eq!(message.answer_address(), Ok(&[192, 168, 1, 20][..]));
        assert_eq!(
            message.answer_ip(),
            Ok(Some(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20))))
        );
    }

    #[test]
    fn answer_ip_of_odd_payload() {
        let v6 = Ipv6Addr::new(0xfe80, 0, 0, 0, 0, 0, 0, 1);
        assert_eq!(
            answer(v6.octets().to_vec()).answer_ip(),
            Ok(Some(IpAddr::V6(v6)))
        );
        assert_eq!(answer(vec![1, 2, 3]).answer_ip(), Ok(None));
    }

    #[test]
    fn missing_answer() {
        assert_eq!(query().answer_address(), Err(ParserError::MissingAnswer));
        assert_eq!(query().answer_ip(), Err(ParserError::MissingAnswer));
    }

    #[test]
    fn truncated_message() {
        let bytes = answer(vec![1, 2, 3, 4]).to_bytes();

        assert_eq!(
            Message::parse(&bytes[..bytes.len() - 2]),
            Err(ParserError::TruncatedInput)
        );
        assert_eq!(Message::parse(&bytes[..4]), Err(ParserError::TruncatedInput));
    }
}
