pub mod markdown_parser;
