pub mod layered_network;
