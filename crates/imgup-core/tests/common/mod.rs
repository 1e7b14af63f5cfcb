pub mod messages_server;
