mod cursor;
mod error;
mod header;
mod message;
mod qname;
mod question;
mod resource_record;

pub use cursor::Cursor;
pub use error::ParserError;
pub use header::Header;
pub use message::Message;
pub use qname::DomainName;
pub use question::Question;
pub use resource_record::ResourceRecord;

pub const TYPE_A: u16 = 1;
pub const CLASS_IN: u16 = 1;
